//! Storefront service.
//!
//! The facade a view layer drives: cart mutations, promo selection, live
//! totals and checkout. Every call reads the current records from the
//! injected store, applies one change and writes the result back, so a
//! reload (a fresh `Storefront` over the same store) sees the same state.

pub mod records;


use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogError};
use crate::config::Config;
use crate::interfaces::{KeyValueStore, StoreError, WriteOp};
use crate::order::{unique_order_id, CheckoutError, CustomerDetails, Order};
use crate::pricing::{PricingRules, Totals};
use crate::promo::{PromoCode, UnknownPromo};
use crate::storage::init_storage;
use crate::validation::require_not_empty;

pub use records::RecordKeys;

/// Result type for storefront operations.
pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Errors surfaced to the view layer.
#[derive(Debug, thiserror::Error)]
pub enum StorefrontError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Checkout rejected: {0}")]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    UnknownPromo(#[from] UnknownPromo),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Cart, promo and order ledger over one key-value store.
pub struct Storefront {
    store: Arc<dyn KeyValueStore>,
    catalog: Catalog,
    rules: PricingRules,
    keys: RecordKeys,
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog_items", &self.catalog.len())
            .field("rules", &self.rules)
            .field("keys", &self.keys)
            .finish()
    }
}

impl Storefront {
    /// Storefront using the house pricing rules and default record keys.
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Catalog) -> Self {
        Self {
            store,
            catalog,
            rules: PricingRules::default(),
            keys: RecordKeys::default(),
        }
    }

    pub fn with_rules(mut self, rules: PricingRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_keys(mut self, keys: RecordKeys) -> Self {
        self.keys = keys;
        self
    }

    /// Open the configured store and serve the house menu from it.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = init_storage(&config.storage).await?;
        Ok(Self::new(store, Catalog::house_menu())
            .with_rules(config.pricing.clone())
            .with_keys(RecordKeys::with_prefix(&config.storage.key_prefix)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub async fn cart(&self) -> Result<Cart> {
        Ok(records::load(&*self.store, &self.keys.cart).await?)
    }

    /// Units in the cart, for the header badge.
    pub async fn item_count(&self) -> Result<u32> {
        Ok(self.cart().await?.item_count())
    }

    pub async fn increment(&self, item_id: &str) -> Result<Cart> {
        self.mutate_cart("increment", |cart| {
            cart.increment(item_id);
        })
        .await
    }

    pub async fn decrement(&self, item_id: &str) -> Result<Cart> {
        self.mutate_cart("decrement", |cart| {
            cart.decrement(item_id);
        })
        .await
    }

    pub async fn remove(&self, item_id: &str) -> Result<Cart> {
        self.mutate_cart("remove", |cart| {
            cart.remove(item_id);
        })
        .await
    }

    pub async fn set_quantity(&self, item_id: &str, quantity: u32) -> Result<Cart> {
        self.mutate_cart("set_quantity", |cart| cart.set_quantity(item_id, quantity))
            .await
    }

    pub async fn clear_cart(&self) -> Result<Cart> {
        self.mutate_cart("clear", Cart::clear).await
    }

    /// Load, change, persist the whole mapping, return the new cart.
    async fn mutate_cart<F>(&self, action: &'static str, change: F) -> Result<Cart>
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = self.cart().await?;
        change(&mut cart);
        records::save(&*self.store, &self.keys.cart, &cart).await?;
        debug!(action, item_count = cart.item_count(), "Cart updated");
        Ok(cart)
    }

    // =========================================================================
    // Promo
    // =========================================================================

    /// The active promo. A stored value that is not a known code reads as none.
    pub async fn promo(&self) -> Result<Option<PromoCode>> {
        Ok(records::load(&*self.store, &self.keys.promo).await?)
    }

    /// Activate a promo code, replacing any previous one.
    pub async fn apply_promo(&self, code: &str) -> Result<PromoCode> {
        let promo: PromoCode = code.parse()?;
        records::save(&*self.store, &self.keys.promo, &promo).await?;
        info!(promo = %promo, "Promo applied");
        Ok(promo)
    }

    pub async fn clear_promo(&self) -> Result<()> {
        self.store.delete(&self.keys.promo).await?;
        Ok(())
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Totals for the current cart and promo.
    pub async fn totals(&self) -> Result<Totals> {
        let cart = self.cart().await?;
        let promo = self.promo().await?;
        Ok(self.rules.compute(&cart, &self.catalog, promo))
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Place an order for the current cart.
    ///
    /// On success the order is appended to the ledger and the cart and promo
    /// are cleared in the same store batch. On any failure nothing changes.
    /// An unreadable ledger is copied to its `_unreadable` key before the new
    /// ledger replaces it.
    pub async fn place_order(&self, customer: &CustomerDetails) -> Result<Order> {
        let totals = self.totals().await?;
        require_not_empty(&totals.line_items, CheckoutError::EmptyCart)?;
        let customer = customer.validate()?;

        let (mut ledger, unreadable): (Vec<Order>, _) =
            records::load_or_unreadable(&*self.store, &self.keys.orders).await?;
        let order = Self::new_order(&ledger, &totals, customer);
        ledger.push(order.clone());

        // Ledger first; backends that commit in reverse land it last.
        let mut ops = vec![
            records::put_op(&self.keys.orders, &ledger)?,
            records::put_op(&self.keys.cart, &Cart::new())?,
            WriteOp::delete(self.keys.promo.as_str()),
        ];
        if let Some(raw) = unreadable {
            let aside = records::unreadable_key(&self.keys.orders);
            warn!(key = %aside, "Setting aside unreadable order ledger");
            ops.push(WriteOp::put(aside, raw));
        }
        self.store.write_batch(ops).await?;

        info!(
            order_id = %order.order_id,
            total = %order.total,
            items = order.item_count(),
            "Order placed"
        );
        Ok(order)
    }

    fn new_order(ledger: &[Order], totals: &Totals, customer: CustomerDetails) -> Order {
        let now = Utc::now();
        let order_id = unique_order_id(ledger, now, &mut rand::rng());
        Order::place(order_id, totals, customer, now)
    }

    // =========================================================================
    // Ledger
    // =========================================================================

    /// Every placed order, oldest first.
    pub async fn orders(&self) -> Result<Vec<Order>> {
        Ok(records::load(&*self.store, &self.keys.orders).await?)
    }

    pub async fn find_order(&self, order_id: &str) -> Result<Option<Order>> {
        Ok(self
            .orders()
            .await?
            .into_iter()
            .find(|o| o.order_id == order_id))
    }
}
