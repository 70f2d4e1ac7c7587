use std::sync::Arc;

use tracing::{info, warn};

use crate::analysis::fallback::fallback_analyze;
use crate::analysis::model::{ModelAnalyzer, ModelOutcome};
use crate::analysis::result::AnalysisResult;

/// Chooses between the model-backed analyzer and the keyword fallback.
///
/// - No model configured: keyword fallback, no network call.
/// - Model configured: try it once; any failure is logged and answered with
///   the keyword fallback. Callers always receive a result.
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    model: Option<Arc<dyn ModelAnalyzer>>,
}

impl AnalysisOrchestrator {
    pub fn new(model: Option<Arc<dyn ModelAnalyzer>>) -> Self {
        Self { model }
    }

    pub fn model_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn analyze(&self, resume_text: &str, job_description: &str) -> AnalysisResult {
        let Some(model) = &self.model else {
            info!("No model credential configured; using keyword analysis");
            return fallback_analyze(resume_text, job_description);
        };

        match model.analyze(resume_text, job_description).await {
            ModelOutcome::Succeeded(result) => {
                info!(
                    match_percentage = result.match_percentage.value(),
                    "Model analysis succeeded"
                );
                result
            }
            ModelOutcome::Failed(reason) => {
                warn!("Model analysis failed, falling back to keyword analysis: {reason}");
                fallback_analyze(resume_text, job_description)
            }
        }
    }
}
