use std::sync::Arc;

use crate::analysis::model::{LlmModelAnalyzer, ModelAnalyzer};
use crate::analysis::orchestrator::AnalysisOrchestrator;
use crate::config::Config;
use crate::llm_client::{LlmClient, LlmError};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Model-backed analyzer when `OPENAI_API_KEY` is set, keyword fallback otherwise.
    pub orchestrator: AnalysisOrchestrator,
}

impl AppState {
    pub fn from_config(config: Config) -> Result<Self, LlmError> {
        let model = match &config.openai_api_key {
            Some(api_key) => {
                let llm = LlmClient::new(api_key.clone())?;
                Some(Arc::new(LlmModelAnalyzer::new(llm)) as Arc<dyn ModelAnalyzer>)
            }
            None => None,
        };

        Ok(Self {
            config,
            orchestrator: AnalysisOrchestrator::new(model),
        })
    }
}
