use std::sync::Arc;

use sqlx::SqlitePool;

mod impression_store;

pub use impression_store::{ImpressionRecord, ImpressionStore, MAX_RECENT_IMPRESSIONS};

/// Shared application state handed to the router. People and posts keep
/// separate impression histories.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub people_impressions: Arc<ImpressionStore>,
    pub post_impressions: Arc<ImpressionStore>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            people_impressions: Arc::new(ImpressionStore::new()),
            post_impressions: Arc::new(ImpressionStore::new()),
        }
    }
}
