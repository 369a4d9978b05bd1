use serde::{Deserialize, Serialize};

/// Message used for every service, transport, or contract failure.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Error analyzing response";
/// Message used when the model credential is missing.
pub const NOT_CONFIGURED_MESSAGE: &str = "API key not configured";
/// Message used when facts or speech are empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

/// Feedback for one analysis request.
///
/// `success` is the model's verdict on the answer. Failures of the request
/// itself use the same shape with `success = false` and a fixed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AnalysisResult {
    #[must_use]
    pub fn new(success: bool, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success,
            message: message.into(),
            details,
        }
    }

    /// Uniform failure payload carrying the underlying error text.
    #[must_use]
    pub fn failure(details: impl Into<String>) -> Self {
        Self::new(false, ANALYSIS_FAILED_MESSAGE, Some(details.into()))
    }

    /// Failure payload without details.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(false, message, None)
    }
}
