//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::models::view::DEFAULT_WINDOW_DAYS;
use crate::services::auth::TokenService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for catalog, users and view events
    pub repository: Arc<dyn FullRepository>,
    /// Bearer token issuer/verifier
    pub tokens: Arc<TokenService>,
    /// Look-back used when the analytics request omits `startDate`
    pub analytics_window_days: i64,
}

impl AppState {
    pub fn new(repository: Arc<dyn FullRepository>, tokens: TokenService) -> Self {
        Self {
            repository,
            tokens: Arc::new(tokens),
            analytics_window_days: DEFAULT_WINDOW_DAYS,
        }
    }

    pub fn with_analytics_window_days(mut self, days: i64) -> Self {
        self.analytics_window_days = days;
        self
    }
}
