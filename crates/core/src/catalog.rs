//! The static product catalog and category filtering.
//!
//! A [`Catalog`] is fixed for the lifetime of the process. It is built once at
//! startup (normally via [`Catalog::builtin`]) and only ever read afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Label of the filter option that shows every product.
pub const ALL_CATEGORIES: &str = "all";

/// Built-in products: id, name, price, category, image.
///
/// Ids are literal and distinct.
const BUILTIN_PRODUCTS: &[(&str, &str, i64, &str, &str)] = &[
    ("1", "Espresso", 180, "coffee", "/assets/products/espresso.jpg"),
    ("2", "Cappuccino", 250, "coffee", "/assets/products/cappuccino.jpg"),
    ("3", "Latte", 280, "coffee", "/assets/products/latte.jpg"),
    ("4", "Croissant", 220, "bakery", "/assets/products/croissant.png"),
    ("5", "Blueberry Muffin", 200, "bakery", "/assets/products/muffin.png"),
    ("6", "Sourdough Loaf", 320, "bakery", "/assets/products/sourdough.png"),
    ("7", "iPhone Cable", 1200, "electronics", "/assets/products/iphone-cable.png"),
    ("8", "Earbuds", 2400, "electronics", "/assets/products/earbuds.png"),
    ("9", "AA Batteries (4)", 360, "electronics", "/assets/products/batteries.png"),
    ("10", "Fresh Milk 1L", 160, "groceries", "/assets/products/milk.png"),
    ("11", "Free-Range Eggs (6)", 340, "groceries", "/assets/products/eggs.png"),
    ("12", "Granola", 540, "groceries", "/assets/products/granola.png"),
];

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    /// Path of the product image on the static asset server.
    pub image: String,
    /// Short remark shown under the product name (e.g. "Double shot").
    #[serde(default)]
    pub note: Option<String>,
}

impl Product {
    /// Create a product without a note.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        category: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            image: image.into(),
            note: None,
        }
    }

    /// Attach a note to the product.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Errors building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("duplicate product id: {0}")]
    DuplicateProductId(ProductId),
}

/// Selected category on the filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Parse a filter from its display label.
    ///
    /// `"all"` selects everything; any other value, including an empty string,
    /// is taken literally as a category name.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Category(label.to_owned())
        }
    }

    /// Label used for the filter button and in query strings.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Category(category) => category,
        }
    }

    /// Whether `product` is shown under this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => product.category == *category,
        }
    }
}

/// An ordered, immutable set of products with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products in display order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProductId` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateProductId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// The catalog stocked by the terminal.
    #[must_use]
    pub fn builtin() -> Self {
        let products = BUILTIN_PRODUCTS
            .iter()
            .map(|&(id, name, price, category, image)| {
                let product = Product::new(id, name, Price::kes(price), category, image);
                match id {
                    "1" => product.with_note("Double shot"),
                    _ => product,
                }
            })
            .collect();
        Self { products }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == *id)
    }

    /// Filter options: `All`, then each distinct category in order of first
    /// appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryFilter> {
        let mut seen = HashSet::new();
        let mut options = vec![CategoryFilter::All];
        for product in &self.products {
            if seen.insert(product.category.as_str()) {
                options.push(CategoryFilter::Category(product.category.clone()));
            }
        }
        options
    }

    /// Products shown under `filter`, in catalog order.
    ///
    /// A category that no product carries yields an empty list.
    #[must_use]
    pub fn filter(&self, filter: &CategoryFilter) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| filter.matches(product))
            .collect()
    }
}
