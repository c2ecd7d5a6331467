//! Validation helpers for checkout precondition checks.
//!
//! Each helper returns the caller-supplied error on failure so the caller
//! learns exactly which precondition failed.

use std::sync::LazyLock;

use regex::Regex;

/// Optional leading `+`, then 7 to 15 digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone pattern is valid"));

/// Require a non-blank field, returning it trimmed.
pub fn require_present<E>(value: &str, err: E) -> Result<&str, E> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed)
}

/// Require that a slice is not empty.
pub fn require_not_empty<T, E>(items: &[T], err: E) -> Result<(), E> {
    if items.is_empty() {
        return Err(err);
    }
    Ok(())
}

/// Require a phone number; whitespace anywhere in it is ignored.
pub fn require_phone<E>(value: &str, err: E) -> Result<(), E> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !PHONE_PATTERN.is_match(&compact) {
        return Err(err);
    }
    Ok(())
}
