use std::sync::Arc;

use study_core::analysis::{AnalysisRequest, build_prompt, parse_model_reply};
use study_core::model::AnalysisResult;
use tracing::{info, warn};

use crate::error::AnalysisError;
use crate::language_model::{AnthropicClient, LanguageModel, LanguageModelConfig};

/// Turns an analysis request into model feedback.
///
/// Flow per call: configuration check, input validation, prompt assembly, one
/// model round trip, reply validation. Nothing is retried.
#[derive(Clone)]
pub struct AnalysisService {
    model: Option<Arc<dyn LanguageModel>>,
}

impl AnalysisService {
    #[must_use]
    pub fn from_env() -> Self {
        let model = LanguageModelConfig::from_env().map(|config| {
            info!(model = %config.model, "analysis model configured");
            Arc::new(AnthropicClient::new(config)) as Arc<dyn LanguageModel>
        });
        if model.is_none() {
            warn!("ANTHROPIC_API_KEY is not set; analysis requests will fail");
        }
        Self::new(model)
    }

    #[must_use]
    pub fn new(model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self { model }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.model.is_some()
    }

    /// Analyze a spoken answer against the required facts.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::NotConfigured` before anything else when no
    /// model is configured, `MissingInput` when facts or speech are empty,
    /// `Model` when the call fails, and `Contract` when the reply does not
    /// match the feedback shape.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let model = self.model.as_ref().ok_or(AnalysisError::NotConfigured)?;
        let prompt = build_prompt(request)?;

        info!(
            accuracy = request.accuracy.as_str(),
            language = request.language.as_str(),
            prompt_len = prompt.len(),
            "requesting analysis"
        );

        let reply = model.complete(&prompt).await.map_err(|err| {
            warn!(error = %err, "analysis model call failed");
            AnalysisError::from(err)
        })?;

        let result = parse_model_reply(&reply).map_err(|err| {
            warn!(error = %err, reply_len = reply.len(), "analysis reply rejected");
            AnalysisError::from(err)
        })?;

        info!(success = result.success, "analysis completed");
        Ok(result)
    }
}
