//! The POS screen: category bar, product grid, and cart panel.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use till_core::catalog::ALL_CATEGORIES;
use till_core::{Cart, CartLine, CategoryFilter, Product};

use crate::error::Result;
use crate::filters;
use crate::routes::cart::load_cart;
use crate::state::AppState;

/// Category button display data.
#[derive(Clone)]
pub struct CategoryView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
}

/// Product card display data.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub note: Option<String>,
}

/// Cart line display data.
#[derive(Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub qty: u32,
    pub price: String,
    pub line_total: String,
}

/// Cart panel display data.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            note: product.note.clone(),
        }
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id().to_string(),
            name: line.product.name.clone(),
            qty: line.qty,
            price: line.product.price.to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Location of the screen with `category` selected.
#[must_use]
pub fn screen_href(category: &str) -> String {
    if category == ALL_CATEGORIES {
        return "/".to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("category", category)
        .finish();
    format!("/?{query}")
}

/// Screen query parameters.
#[derive(Debug, Deserialize)]
pub struct ScreenQuery {
    pub category: Option<String>,
}

/// POS screen template.
#[derive(Template, WebTemplate)]
#[template(path = "screen.html")]
pub struct ScreenTemplate {
    pub categories: Vec<CategoryView>,
    pub products: Vec<ProductView>,
    /// Label of the selected category, echoed back by every form.
    pub active_category: String,
    pub cart: CartView,
}

/// Display the POS screen.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ScreenQuery>,
) -> Result<ScreenTemplate> {
    let filter = CategoryFilter::parse(query.category.as_deref().unwrap_or(ALL_CATEGORIES));
    let catalog = state.catalog();

    let categories = catalog
        .categories()
        .iter()
        .map(|option| CategoryView {
            label: option.label().to_string(),
            href: screen_href(option.label()),
            is_active: *option == filter,
        })
        .collect();

    let products = catalog
        .filter(&filter)
        .into_iter()
        .map(ProductView::from)
        .collect();

    let cart = load_cart(&state, &session).await?;

    Ok(ScreenTemplate {
        categories,
        products,
        active_category: filter.label().to_string(),
        cart: CartView::from(&cart),
    })
}
