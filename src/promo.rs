//! Promotional codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A recognized promo code.
///
/// Persisted as the bare code string, e.g. `"WELCOME20"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromoCode {
    /// Percentage off the subtotal, no minimum.
    #[serde(rename = "WELCOME20")]
    Welcome20,
    /// Flat amount off once the subtotal reaches the combo minimum.
    #[serde(rename = "COMBO50")]
    Combo50,
    /// Flat amount off once the subtotal reaches the dessert minimum.
    #[serde(rename = "FREEDESSERT")]
    FreeDessert,
}

/// Code string that matched no known promo.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown promo code: {0}")]
pub struct UnknownPromo(pub String);

impl PromoCode {
    pub const ALL: [PromoCode; 3] = [
        PromoCode::Welcome20,
        PromoCode::Combo50,
        PromoCode::FreeDessert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PromoCode::Welcome20 => "WELCOME20",
            PromoCode::Combo50 => "COMBO50",
            PromoCode::FreeDessert => "FREEDESSERT",
        }
    }

    /// Offer text shown next to the code.
    pub fn description(self) -> &'static str {
        match self {
            PromoCode::Welcome20 => "20% off your first order",
            PromoCode::Combo50 => "50 off on orders of 250 or more",
            PromoCode::FreeDessert => "50 off (a free dessert) on orders of 499 or more",
        }
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromoCode {
    type Err = UnknownPromo;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PromoCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPromo(s.to_string()))
    }
}
