//! Totals computation.
//!
//! Pure functions from (cart, catalog, promo) to a [`Totals`] breakdown.
//! Nothing here touches storage, so totals are recomputed on every change
//! and never persisted.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::money::Money;
use crate::promo::PromoCode;

/// Thresholds, fees and rates applied by the pricing engine.
///
/// Amounts are in minor units. `Default` is the house rule set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PricingRules {
    /// Percentage taken off by `WELCOME20`.
    pub welcome_percent: u32,
    /// Flat discount given by `COMBO50`.
    pub combo_discount: Money,
    /// Subtotal required before `COMBO50` applies.
    pub combo_minimum: Money,
    /// Flat discount given by `FREEDESSERT`.
    pub dessert_discount: Money,
    /// Subtotal required before `FREEDESSERT` applies.
    pub dessert_minimum: Money,
    /// Discounted amount at or above which delivery is free.
    pub free_delivery_threshold: Money,
    /// Delivery charge below the threshold.
    pub delivery_fee: Money,
    /// Tax rate applied to the discounted amount.
    pub tax_percent: u32,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            welcome_percent: 20,
            combo_discount: Money::from_units(50),
            combo_minimum: Money::from_units(250),
            dessert_discount: Money::from_units(50),
            dessert_minimum: Money::from_units(499),
            free_delivery_threshold: Money::from_units(399),
            delivery_fee: Money::from_units(40),
            tax_percent: 5,
        }
    }
}

/// A cart line resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

impl LineItem {
    pub fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Derived pricing breakdown for one cart + promo state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub line_items: Vec<LineItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub after_discount: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub grand_total: Money,
}

impl Totals {
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Units across resolved lines only.
    pub fn item_count(&self) -> u32 {
        self.line_items
            .iter()
            .fold(0, |acc, l| acc.saturating_add(l.quantity))
    }
}

impl PricingRules {
    /// Discount a promo earns on a given subtotal.
    pub fn discount(&self, promo: Option<PromoCode>, subtotal: Money) -> Money {
        match promo {
            Some(PromoCode::Welcome20) => subtotal.percent(self.welcome_percent),
            Some(PromoCode::Combo50) if subtotal >= self.combo_minimum => self.combo_discount,
            Some(PromoCode::FreeDessert) if subtotal >= self.dessert_minimum => {
                self.dessert_discount
            }
            _ => Money::ZERO,
        }
    }

    pub fn delivery_fee(&self, after_discount: Money) -> Money {
        if after_discount >= self.free_delivery_threshold {
            Money::ZERO
        } else {
            self.delivery_fee
        }
    }

    pub fn tax(&self, after_discount: Money) -> Money {
        after_discount.percent(self.tax_percent)
    }

    /// Compute totals under these rules.
    ///
    /// Ids missing from the catalog are dropped from every figure.
    pub fn compute(&self, cart: &Cart, catalog: &Catalog, promo: Option<PromoCode>) -> Totals {
        let line_items: Vec<LineItem> = cart
            .iter()
            .filter_map(|(id, quantity)| {
                let Some(item) = catalog.get(id) else {
                    debug!(item_id = id, "Dropping unknown item from totals");
                    return None;
                };
                Some(LineItem {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    unit_price: item.price,
                    quantity,
                })
            })
            .collect();

        let subtotal: Money = line_items.iter().map(LineItem::line_total).sum();
        let discount = self.discount(promo, subtotal);
        let after_discount = subtotal.saturating_sub(discount);
        let delivery_fee = self.delivery_fee(after_discount);
        let tax = self.tax(after_discount);

        Totals {
            line_items,
            subtotal,
            discount,
            after_discount,
            delivery_fee,
            tax,
            grand_total: after_discount + delivery_fee + tax,
        }
    }
}

/// Compute totals under the house rules.
pub fn compute_totals(cart: &Cart, catalog: &Catalog, promo: Option<PromoCode>) -> Totals {
    PricingRules::default().compute(cart, catalog, promo)
}
