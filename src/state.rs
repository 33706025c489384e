use crate::{config::Config, database::DbPool};
use std::sync::Arc;

/// Application state shared across all HTTP handlers
///
/// Constructed once at startup and injected into the router; nothing in
/// the request path reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing the database
    pub pool: DbPool,
    /// Loaded application configuration (JWT secret, CORS origin, ...)
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
