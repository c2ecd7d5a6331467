//! Fixed-point currency amounts.
//!
//! All pricing math runs on integer minor units (1/100 of the currency unit),
//! so totals are exact and identical across calls.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Minor units per currency unit.
pub const MINOR_PER_UNIT: i64 = 100;

/// A currency amount in minor units.
///
/// Serializes as a bare JSON integer of minor units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Amount from minor units (paise, cents).
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Amount from whole currency units.
    pub const fn from_units(units: i64) -> Self {
        Money(units * MINOR_PER_UNIT)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `percent`% of this amount, rounded half-up to the nearest minor unit.
    pub fn percent(self, percent: u32) -> Money {
        Money((self.0 * i64::from(percent) + 50).div_euclid(100))
    }

    /// This amount multiplied by a quantity.
    pub fn times(self, quantity: u32) -> Money {
        Money(self.0 * i64::from(quantity))
    }

    /// `self - other`, floored at zero.
    pub fn saturating_sub(self, other: Money) -> Money {
        Money((self.0 - other.0).max(0))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    /// Two-decimal rendering, e.g. `420.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let per = MINOR_PER_UNIT as u64;
        write!(f, "{}{}.{:02}", sign, abs / per, abs % per)
    }
}
