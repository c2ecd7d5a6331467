//! orderit - food ordering core
//!
//! Menu catalog, a persisted cart, promo-aware pricing and an append-only
//! order ledger. A view layer drives everything through [`Storefront`];
//! persistence goes through the [`KeyValueStore`] it is given.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod interfaces;
pub mod money;
pub mod order;
pub mod pricing;
pub mod promo;
pub mod storage;
pub mod storefront;
pub mod utils;
pub mod validation;

pub use cart::Cart;
pub use catalog::{Catalog, Category, MenuItem};
pub use interfaces::{KeyValueStore, StoreError, WriteOp};
pub use money::Money;
pub use order::{CheckoutError, CustomerDetails, Order, OrderLine, OrderStatus};
pub use pricing::{compute_totals, LineItem, PricingRules, Totals};
pub use promo::PromoCode;
pub use storefront::{RecordKeys, Storefront, StorefrontError};
