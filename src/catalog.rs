//! Menu catalog.
//!
//! The catalog is fixed at startup and read-only afterwards. Carts refer to
//! items by id only; anything the view needs to show comes from here.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Result type for catalog construction.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate menu item id: {0}")]
    DuplicateId(String),

    #[error("Menu item {id} has a negative price")]
    NegativePrice { id: String },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Menu section an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mains,
    Starters,
    Desserts,
    Beverages,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Mains,
        Category::Starters,
        Category::Desserts,
        Category::Beverages,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mains => "mains",
            Category::Starters => "starters",
            Category::Desserts => "desserts",
            Category::Beverages => "beverages",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// A purchasable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: Category,
    /// Image reference, resolved by the view layer.
    pub image: String,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        category: Category,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            category,
            image: image.into(),
        }
    }

    /// Case-insensitive substring match on name or description.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Immutable list of menu items with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and negative prices.
    pub fn new(items: Vec<MenuItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if item.price.is_negative() {
                return Err(CatalogError::NegativePrice {
                    id: item.id.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    /// The house menu served by default.
    pub fn house_menu() -> Self {
        use Category::*;

        let item = |id: &str, name: &str, desc: &str, price: i64, category: Category, image: &str| {
            MenuItem::new(id, name, desc, Money::from_units(price), category, image)
        };

        Self {
            items: vec![
                item(
                    "m1",
                    "Margherita Pizza",
                    "Classic cheese & tomato base",
                    299,
                    Mains,
                    "images/pizza.jpeg",
                ),
                item(
                    "m2",
                    "Paneer Biryani",
                    "Fragrant rice with soft paneer chunks",
                    349,
                    Mains,
                    "images/panner_biriyani.jpeg",
                ),
                item(
                    "m3",
                    "Samosa (2 pcs)",
                    "Crispy pastry filled with spiced potato",
                    69,
                    Starters,
                    "images/samosa.jpeg",
                ),
                item(
                    "m4",
                    "Paneer Tikka",
                    "Chargrilled paneer with masala",
                    199,
                    Starters,
                    "images/panner_tikka.jpeg",
                ),
                item(
                    "m5",
                    "Gulab Jamun (2)",
                    "Syrupy warm classic dessert",
                    99,
                    Desserts,
                    "images/gulob_jamun.jpeg",
                ),
                item(
                    "m6",
                    "Cold Coffee",
                    "Iced coffee with milk & sugar",
                    89,
                    Beverages,
                    "images/cold_coffee.jpeg",
                ),
                item(
                    "m7",
                    "Veggie Burger",
                    "Loaded with fresh veggies & sauces",
                    199,
                    Mains,
                    "images/veg_burger.jpeg",
                ),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items matching a free-text query and an optional category.
    ///
    /// A blank query matches everything. Catalog order is preserved.
    pub fn filter(&self, query: &str, category: Option<Category>) -> Vec<&MenuItem> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| category.is_none_or(|c| item.category == c))
            .filter(|item| needle.is_empty() || item.matches(&needle))
            .collect()
    }

    /// The first `n` items, used for the landing-page preview.
    pub fn featured(&self, n: usize) -> &[MenuItem] {
        &self.items[..n.min(self.items.len())]
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::house_menu()
    }
}
