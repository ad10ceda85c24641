//! Shared application state.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use willow_catalog::CatalogStore;
use willow_core::WillowConfig;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: WillowConfig,
    pub catalog: CatalogStore,
}

impl AppState {
    pub fn new(config: WillowConfig, catalog: CatalogStore) -> Self {
        Self { config, catalog }
    }

    /// Locale for a request, falling back to the configured default.
    pub fn locale(&self, requested: Option<String>) -> String {
        requested.unwrap_or_else(|| self.config.default_locale.clone())
    }
}

/// Raw consent cookie value from the request headers, if present.
pub fn consent_cookie(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE).and_then(|v| v.to_str().ok());
    willow_consent::read_consent_cookie(header)
}
