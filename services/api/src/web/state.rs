//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the identity attached to
//! authenticated requests.

use crate::config::Config;
use chrono::Duration;
use persona_cart_core::ports::DatabaseService;
use std::sync::Arc;
use uuid::Uuid;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn DatabaseService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: Arc<dyn DatabaseService>, config: Arc<Config>) -> Self {
        Self { db, config }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::days(self.config.session_ttl_days)
    }
}

/// The account behind an authenticated request. Inserted into the request
/// extensions by `require_auth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: Uuid,
}
