//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;
use your_slice_core::catalog::ProductCatalog;
use your_slice_core::orders::OrderBoard;

use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// The orders and products tables live in process memory for the life of
/// the server; every staff member sees and edits the same tables.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    orders: RwLock<OrderBoard>,
    products: RwLock<ProductCatalog>,
}

impl AppState {
    /// Create state seeded with the demo orders and products.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        Self::with_tables(config, OrderBoard::sample(), ProductCatalog::sample())
    }

    /// Create state with explicit tables.
    #[must_use]
    pub fn with_tables(config: AdminConfig, orders: OrderBoard, products: ProductCatalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                orders: RwLock::new(orders),
                products: RwLock::new(products),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn orders(&self) -> &RwLock<OrderBoard> {
        &self.inner.orders
    }

    #[must_use]
    pub fn products(&self) -> &RwLock<ProductCatalog> {
        &self.inner.products
    }
}
