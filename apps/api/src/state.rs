use std::sync::Arc;

use crate::llm_client::Generator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Schema-constrained generation backend. Default: `GeminiClient`.
    pub generator: Arc<dyn Generator>,
}
