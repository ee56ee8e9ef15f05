use std::sync::Arc;

use crate::analysis::ReadinessAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analysis backend. Default: KeywordAnalyzer.
    pub analyzer: Arc<dyn ReadinessAnalyzer>,
}
