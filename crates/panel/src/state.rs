//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::PanelConfig;
use crate::marketplace::{MarketplaceClient, MarketplaceError};
use crate::services::{OrderService, SessionHub};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc` and provides access to the upstream client,
/// the order lifecycle service, and the session hub.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PanelConfig,
    marketplace: MarketplaceClient,
    orders: OrderService,
    sessions: SessionHub,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream HTTP client fails to build.
    pub fn new(config: PanelConfig) -> Result<Self, MarketplaceError> {
        let marketplace = MarketplaceClient::new(&config.upstream)?;
        let orders = OrderService::new(marketplace.clone());
        let sessions = SessionHub::new(marketplace.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                marketplace,
                orders,
                sessions,
            }),
        })
    }

    /// Get a reference to the panel configuration.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    /// Get a reference to the marketplace API client.
    #[must_use]
    pub fn marketplace(&self) -> &MarketplaceClient {
        &self.inner.marketplace
    }

    /// Get a reference to the order lifecycle service.
    #[must_use]
    pub fn orders(&self) -> &OrderService {
        &self.inner.orders
    }

    /// Get a reference to the session hub.
    #[must_use]
    pub fn sessions(&self) -> &SessionHub {
        &self.inner.sessions
    }
}
