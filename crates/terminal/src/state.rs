//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use till_core::{Catalog, CheckoutHook, PlaceholderCheckout};

use crate::carts::CartStore;
use crate::config::TerminalConfig;
use crate::middleware::SESSION_EXPIRY_SECONDS;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Carts live in the cart store
/// and are found through the id kept in each operator's session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: TerminalConfig,
    catalog: Catalog,
    carts: CartStore,
    checkout: Box<dyn CheckoutHook>,
}

impl AppState {
    /// Create state with the built-in catalog and a placeholder checkout.
    #[must_use]
    pub fn new(config: TerminalConfig) -> Self {
        Self::with_parts(config, Catalog::builtin(), PlaceholderCheckout)
    }

    /// Create state from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: TerminalConfig,
        catalog: Catalog,
        checkout: impl CheckoutHook + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts: CartStore::new(Duration::from_secs(
                    SESSION_EXPIRY_SECONDS.unsigned_abs(),
                )),
                checkout: Box::new(checkout),
            }),
        }
    }

    /// Get a reference to the terminal configuration.
    #[must_use]
    pub fn config(&self) -> &TerminalConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the store holding every session's cart.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Get the hook invoked by the checkout button.
    #[must_use]
    pub fn checkout(&self) -> &dyn CheckoutHook {
        self.inner.checkout.as_ref()
    }
}
