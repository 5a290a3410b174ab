use std::sync::Arc;

use upskill_core::trends::Trend;
use upskill_generation::TextGenerator;

use crate::cache::TtlCache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: upskill_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// External text generator (HTTP client in production, scripted in tests).
    pub generator: Arc<dyn TextGenerator>,
    /// Generated trend insights keyed by industry.
    pub trend_cache: Arc<TtlCache<String, Vec<Trend>>>,
}
