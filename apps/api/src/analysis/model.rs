//! Model-backed analysis: the LLM path behind the `ModelAnalyzer` trait.
//!
//! Implementations never return errors to the caller. Every outcome is a
//! `ModelOutcome`, and the orchestrator decides what a failure means.

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::result::{parse_model_reply, AnalysisResult, ResultParseError};
use crate::llm_client::{LlmClient, LlmError};

#[derive(Debug, Error)]
pub enum ModelFailure {
    #[error("model call failed: {0}")]
    Upstream(#[from] LlmError),

    #[error("model reply could not be parsed: {0}")]
    Unparseable(#[from] ResultParseError),
}

#[derive(Debug)]
pub enum ModelOutcome {
    Succeeded(AnalysisResult),
    Failed(ModelFailure),
}

impl From<Result<AnalysisResult, ModelFailure>> for ModelOutcome {
    fn from(result: Result<AnalysisResult, ModelFailure>) -> Self {
        match result {
            Ok(analysis) => ModelOutcome::Succeeded(analysis),
            Err(failure) => ModelOutcome::Failed(failure),
        }
    }
}

/// A language-model analyzer. Carried by the orchestrator as `Arc<dyn ModelAnalyzer>`
/// so tests can substitute a scripted implementation.
#[async_trait]
pub trait ModelAnalyzer: Send + Sync {
    async fn analyze(&self, resume_text: &str, job_description: &str) -> ModelOutcome;
}

/// Production analyzer: one completion call, then a validating parse of the reply.
pub struct LlmModelAnalyzer {
    llm: LlmClient,
}

impl LlmModelAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    async fn try_analyze(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<AnalysisResult, ModelFailure> {
        let prompt = build_analysis_prompt(resume_text, job_description);
        let response = self.llm.complete(&prompt).await?;
        let reply = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(parse_model_reply(reply)?)
    }
}

#[async_trait]
impl ModelAnalyzer for LlmModelAnalyzer {
    async fn analyze(&self, resume_text: &str, job_description: &str) -> ModelOutcome {
        self.try_analyze(resume_text, job_description).await.into()
    }
}
