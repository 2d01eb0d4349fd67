use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::InferenceClient;
use crate::screening::questions::QuestionGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable completion backend. Default: GroqClient.
    pub llm: Arc<dyn InferenceClient>,
    pub sessions: SessionStore,
    /// Target question count and attempt budget, from config.
    pub generator: QuestionGenerator,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn InferenceClient>) -> Self {
        Self {
            llm,
            sessions: SessionStore::new(config.max_sessions),
            generator: QuestionGenerator::new(config.num_questions, config.attempt_multiplier),
            config,
        }
    }
}
