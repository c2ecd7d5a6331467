//! Cart quantities and their mutation rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from menu item id to a positive quantity.
///
/// An id that is absent has quantity zero; the map never stores a zero.
/// On the wire this is a JSON object of id to integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct Cart {
    lines: BTreeMap<String, u32>,
}

impl From<BTreeMap<String, u32>> for Cart {
    fn from(mut lines: BTreeMap<String, u32>) -> Self {
        lines.retain(|_, qty| *qty > 0);
        Self { lines }
    }
}

impl From<Cart> for BTreeMap<String, u32> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one of `id`, creating the entry at 1.
    pub fn increment(&mut self, id: &str) -> u32 {
        let qty = self.lines.entry(id.to_string()).or_insert(0);
        *qty = qty.saturating_add(1);
        *qty
    }

    /// Take one of `id` away; the entry disappears when it reaches zero.
    pub fn decrement(&mut self, id: &str) -> u32 {
        match self.lines.get_mut(id) {
            Some(qty) if *qty > 1 => {
                *qty -= 1;
                *qty
            }
            Some(_) => {
                self.lines.remove(id);
                0
            }
            None => 0,
        }
    }

    /// Drop `id` regardless of quantity. Returns the quantity removed.
    pub fn remove(&mut self, id: &str) -> u32 {
        self.lines.remove(id).unwrap_or(0)
    }

    /// Set `id` to exactly `qty`; zero removes the entry.
    pub fn set_quantity(&mut self, id: &str, qty: u32) {
        if qty == 0 {
            self.lines.remove(id);
        } else {
            self.lines.insert(id.to_string(), qty);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity(&self, id: &str) -> u32 {
        self.lines.get(id).copied().unwrap_or(0)
    }

    /// Total number of units across all lines, saturating at `u32::MAX`.
    pub fn item_count(&self) -> u32 {
        self.lines.values().fold(0, |acc, &qty| acc.saturating_add(qty))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.lines.iter().map(|(id, qty)| (id.as_str(), *qty))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for Cart {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let lines: BTreeMap<String, u32> = iter
            .into_iter()
            .map(|(id, qty)| (id.into(), qty))
            .collect();
        Cart::from(lines)
    }
}
