//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::BistroConfig;
use crate::menu::Menu;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart itself is not part
/// of it: each request restores its own cart from the session slot.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BistroConfig,
    menu: Menu,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: BistroConfig, menu: Menu) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, menu }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &BistroConfig {
        &self.inner.config
    }

    /// Get a reference to the menu catalog.
    #[must_use]
    pub fn menu(&self) -> &Menu {
        &self.inner.menu
    }
}
