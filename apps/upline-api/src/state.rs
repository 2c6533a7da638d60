//! Shared application state for the server's own routes.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use sqlx::PgPool;

/// State backing the health probes.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,

    /// Set during shutdown so the readiness probe drains traffic before
    /// the listener stops accepting connections.
    pub shutting_down: Arc<AtomicBool>,

    /// Timeout for the readiness database ping, in seconds.
    pub db_timeout_secs: u64,
}

impl AppState {
    /// Create the application state.
    #[must_use]
    pub fn new(pool: PgPool, db_timeout_secs: u64) -> Self {
        Self {
            pool,
            shutting_down: Arc::new(AtomicBool::new(false)),
            db_timeout_secs,
        }
    }
}
