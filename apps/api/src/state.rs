use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ModelClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds no per-request data; concurrent uploads share it read-only.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable model backend. Default: `GeminiClient`.
    pub model: Arc<dyn ModelClient>,
    pub config: Config,
}
