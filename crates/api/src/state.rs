use std::sync::Arc;

use mailstub_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend read by the validation layer and written by the
    /// entity services.
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
}
