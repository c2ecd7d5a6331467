//! Placed orders and checkout input.
//!
//! An [`Order`] is a snapshot: once built it is appended to the ledger and
//! never changed.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing::{LineItem, Totals};
use crate::validation::{require_phone, require_present};

/// Prefix of every generated order id.
pub const ORDER_ID_PREFIX: &str = "ORD";

/// Random suffixes tried for one timestamp before moving to the next millisecond.
const ATTEMPTS_PER_MILLI: usize = 32;

/// Why a checkout attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Please enter your name")]
    MissingName,

    #[error("Please enter a phone number")]
    MissingPhone,

    #[error("Please enter a delivery address")]
    MissingAddress,

    #[error("Please enter a valid phone number")]
    InvalidPhone,
}

/// Who the order is for, as typed at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl CustomerDetails {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Check every field, returning a trimmed copy.
    ///
    /// Blank fields are reported before a malformed phone.
    pub fn validate(&self) -> Result<CustomerDetails, CheckoutError> {
        let name = require_present(&self.name, CheckoutError::MissingName)?;
        let phone = require_present(&self.phone, CheckoutError::MissingPhone)?;
        let address = require_present(&self.address, CheckoutError::MissingAddress)?;
        require_phone(phone, CheckoutError::InvalidPhone)?;

        Ok(CustomerDetails::new(name, phone, address))
    }
}

/// Lifecycle marker. Orders created here are always `Placed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Placed,
}

/// A line as it was priced when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: String,
    pub name: String,
    pub price: Money,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.price.times(self.quantity)
    }
}

impl From<&LineItem> for OrderLine {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// A finalized checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub items: Vec<OrderLine>,
    pub subtotal: Money,
    pub discount: Money,
    #[serde(rename = "delivery")]
    pub delivery_fee: Money,
    pub tax: Money,
    pub total: Money,
    #[serde(flatten)]
    pub customer: CustomerDetails,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Snapshot `totals` into a placed order.
    pub fn place(
        order_id: String,
        totals: &Totals,
        customer: CustomerDetails,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id,
            items: totals.line_items.iter().map(OrderLine::from).collect(),
            subtotal: totals.subtotal,
            discount: totals.discount,
            delivery_fee: totals.delivery_fee,
            tax: totals.tax,
            total: totals.grand_total,
            customer,
            created_at,
            status: OrderStatus::Placed,
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |acc, l| acc.saturating_add(l.quantity))
    }
}

impl fmt::Display for Order {
    /// Plain-text receipt.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order ID: {}", self.order_id)?;
        writeln!(f, "Subtotal: {}", self.subtotal)?;
        writeln!(f, "Discount: -{}", self.discount)?;
        writeln!(f, "Delivery: {}", self.delivery_fee)?;
        writeln!(f, "Tax: {}", self.tax)?;
        writeln!(f, "Total: {}", self.total)?;
        writeln!(f, "Name: {}", self.customer.name)?;
        writeln!(f, "Phone: {}", self.customer.phone)?;
        writeln!(f, "Address: {}", self.customer.address)?;
        writeln!(f, "Items:")?;
        for line in &self.items {
            writeln!(f, "  {} x {} = {}", line.name, line.quantity, line.line_total())?;
        }
        Ok(())
    }
}

/// `ORD` + the last six digits of the epoch milliseconds + three random digits.
pub fn generate_order_id(now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let millis = now.timestamp_millis().rem_euclid(1_000_000);
    let suffix: u32 = rng.random_range(100..1000);
    format!("{}{:06}{}", ORDER_ID_PREFIX, millis, suffix)
}

/// Generate an id that no order in `existing` already uses.
///
/// When a millisecond's suffixes keep colliding the timestamp part steps
/// forward, so a ledger holding every suffix for `now` still yields an id.
pub fn unique_order_id(existing: &[Order], now: DateTime<Utc>, rng: &mut impl Rng) -> String {
    let mut stamp = now;
    loop {
        for _ in 0..ATTEMPTS_PER_MILLI {
            let candidate = generate_order_id(stamp, rng);
            if !existing.iter().any(|o| o.order_id == candidate) {
                return candidate;
            }
        }
        stamp += TimeDelta::milliseconds(1);
    }
}
