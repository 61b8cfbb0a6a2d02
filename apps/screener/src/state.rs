use std::sync::Arc;

use crate::config::Config;
use crate::embedding::SentenceEncoder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Sentence encoder, built once at startup and shared read-only by every run.
    pub encoder: Arc<dyn SentenceEncoder>,
}
