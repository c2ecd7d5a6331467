//! Checkout acceptance tests using Cucumber.
//!
//! Scenarios run against a `Storefront` over an in-memory store.
//! Run with:
//!
//! ```bash
//! cargo test --test acceptance
//! ```

use std::sync::Arc;

use cucumber::{given, then, when, World};

use orderit::storage::MemoryStore;
use orderit::{
    Catalog, Category, CustomerDetails, MenuItem, Money, Order, Storefront, StorefrontError,
};

/// Test context for checkout scenarios.
#[derive(World)]
#[world(init = Self::new)]
pub struct CheckoutWorld {
    store: Arc<MemoryStore>,
    menu: Vec<MenuItem>,
    shop: Storefront,
    last_order: Option<Order>,
    last_error: Option<StorefrontError>,
}

impl std::fmt::Debug for CheckoutWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutWorld")
            .field("menu_items", &self.menu.len())
            .field("last_order", &self.last_order.as_ref().map(|o| &o.order_id))
            .field("last_error", &self.last_error)
            .finish()
    }
}

impl CheckoutWorld {
    fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let menu = Catalog::house_menu().items().to_vec();
        let shop = Storefront::new(store.clone(), Catalog::house_menu());
        Self {
            store,
            menu,
            shop,
            last_order: None,
            last_error: None,
        }
    }

    /// Rebuild the storefront over the same store with an extra menu item.
    fn add_menu_item(&mut self, id: &str, price: i64) {
        if self.menu.iter().all(|item| item.id != id) {
            self.menu.push(MenuItem::new(
                id,
                id,
                "",
                Money::from_units(price),
                Category::Mains,
                "",
            ));
        }
        let catalog = Catalog::new(self.menu.clone()).expect("menu ids are unique");
        self.shop = Storefront::new(self.store.clone(), catalog);
    }
}

// --- Given steps ---

#[given("an empty storefront")]
async fn given_empty_storefront(world: &mut CheckoutWorld) {
    assert!(world.store.is_empty().await);
}

#[given(regex = r#"^the cart holds (\d+) of "([^"]+)" priced at (\d+)$"#)]
async fn given_cart_with_priced_item(world: &mut CheckoutWorld, qty: u32, id: String, price: i64) {
    world.add_menu_item(&id, price);
    world.shop.set_quantity(&id, qty).await.unwrap();
}

#[given(regex = r#"^the cart holds (\d+) of "([^"]+)"$"#)]
async fn given_cart_with_item(world: &mut CheckoutWorld, qty: u32, id: String) {
    for _ in 0..qty {
        world.shop.increment(&id).await.unwrap();
    }
}

#[given(regex = r#"^the promo "([^"]+)" is applied$"#)]
async fn given_promo(world: &mut CheckoutWorld, code: String) {
    world.shop.apply_promo(&code).await.unwrap();
}

// --- When steps ---

#[when(regex = r#"^the customer decrements "([^"]+)"$"#)]
async fn when_decrement(world: &mut CheckoutWorld, id: String) {
    world.shop.decrement(&id).await.unwrap();
}

#[when(regex = r#"^the customer checks out as "([^"]*)" with phone "([^"]*)" at "([^"]*)"$"#)]
async fn when_checkout(world: &mut CheckoutWorld, name: String, phone: String, address: String) {
    let details = CustomerDetails::new(name, phone, address);
    match world.shop.place_order(&details).await {
        Ok(order) => world.last_order = Some(order),
        Err(e) => world.last_error = Some(e),
    }
}

// --- Then steps ---

#[then(regex = r"^the (subtotal|discount|delivery fee|tax|grand total) is (\d+\.\d{2})$")]
async fn then_total_field(world: &mut CheckoutWorld, field: String, expected: String) {
    let totals = world.shop.totals().await.unwrap();
    let actual = match field.as_str() {
        "subtotal" => totals.subtotal,
        "discount" => totals.discount,
        "delivery fee" => totals.delivery_fee,
        "tax" => totals.tax,
        "grand total" => totals.grand_total,
        other => panic!("unknown totals field {other}"),
    };
    assert_eq!(actual.to_string(), expected, "{field}");
}

#[then("the cart is empty")]
async fn then_cart_empty(world: &mut CheckoutWorld) {
    assert!(world.shop.cart().await.unwrap().is_empty());
}

#[then(regex = r"^the cart holds (\d+) units$")]
async fn then_cart_units(world: &mut CheckoutWorld, units: u32) {
    assert_eq!(world.shop.item_count().await.unwrap(), units);
}

#[then("the order is placed")]
async fn then_order_placed(world: &mut CheckoutWorld) {
    assert!(world.last_error.is_none(), "unexpected {:?}", world.last_error);
    let order = world.last_order.as_ref().expect("an order was placed");
    assert!(order.order_id.starts_with("ORD"));
}

#[then(regex = r"^the ledger holds (\d+) orders?$")]
async fn then_ledger_len(world: &mut CheckoutWorld, count: usize) {
    assert_eq!(world.shop.orders().await.unwrap().len(), count);
}

#[then("no promo is active")]
async fn then_no_promo(world: &mut CheckoutWorld) {
    assert_eq!(world.shop.promo().await.unwrap(), None);
}

#[then(regex = r#"^checkout fails with "([^"]+)"$"#)]
async fn then_checkout_fails(world: &mut CheckoutWorld, message: String) {
    let err = world.last_error.as_ref().expect("checkout should fail");
    assert!(
        matches!(err, StorefrontError::Checkout(_)),
        "expected a checkout rejection, got {err:?}"
    );
    assert!(err.to_string().contains(&message), "{err}");
    assert!(world.last_order.is_none());
}

#[tokio::main]
async fn main() {
    orderit::utils::bootstrap::init_tracing();
    CheckoutWorld::cucumber()
        .fail_on_skipped()
        .run_and_exit("tests/acceptance/features/checkout.feature")
        .await;
}
