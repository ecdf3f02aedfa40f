//! Application state shared across handlers.

use std::sync::Arc;

use your_slice_core::builder::BuilderLayout;
use your_slice_core::lunch::LunchMenu;

use crate::config::StorefrontConfig;
use crate::db::{KeyValueStore, ReviewRepository};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds configuration, the read-only menus and
/// the review repository. Per-visitor data lives in the session instead.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    layout: BuilderLayout,
    lunch: LunchMenu,
    reviews: ReviewRepository,
}

impl AppState {
    /// Create state from configuration, choosing the review backend from
    /// `reviews_path`.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = config
            .reviews_path
            .as_ref()
            .map_or_else(KeyValueStore::memory, KeyValueStore::file);
        Self::with_store(config, store)
    }

    /// Create state with an explicit review store.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: KeyValueStore) -> Self {
        let layout = config.builder.layout();
        Self {
            inner: Arc::new(AppStateInner {
                config,
                layout,
                lunch: LunchMenu::weekly(),
                reviews: ReviewRepository::new(store),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The slice builder layout served by this site.
    #[must_use]
    pub fn layout(&self) -> &BuilderLayout {
        &self.inner.layout
    }

    #[must_use]
    pub fn lunch(&self) -> &LunchMenu {
        &self.inner.lunch
    }

    #[must_use]
    pub fn reviews(&self) -> &ReviewRepository {
        &self.inner.reviews
    }
}
