use std::sync::Arc;

use clipmark_core::labels::LabelConfig;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: clipmark_db::DbPool,
    /// Server configuration (fallback CSV path, CORS origins, timeouts).
    pub config: Arc<ServerConfig>,
    /// Label vocabularies for the editing UI.
    pub labels: Arc<LabelConfig>,
}
