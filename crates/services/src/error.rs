//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use storage::sqlite::SqliteInitError;
use study_core::analysis::{AnalysisInputError, ResponseError};
use study_core::model::{
    AnalysisResult, MISSING_FIELDS_MESSAGE, NOT_CONFIGURED_MESSAGE, TabError,
};

/// Errors emitted by `LanguageModel` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LanguageModelError {
    #[error("model returned no text content")]
    EmptyResponse,
    #[error("model request failed with status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `AnalysisService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("analysis model is not configured")]
    NotConfigured,
    #[error(transparent)]
    MissingInput(#[from] AnalysisInputError),
    #[error(transparent)]
    Model(#[from] LanguageModelError),
    #[error(transparent)]
    Contract(#[from] ResponseError),
}

impl AnalysisError {
    /// Uniform feedback payload for this failure.
    ///
    /// Configuration and input failures carry a fixed message only; service
    /// and contract failures expose the underlying error text as details.
    #[must_use]
    pub fn to_feedback(&self) -> AnalysisResult {
        match self {
            AnalysisError::NotConfigured => AnalysisResult::rejected(NOT_CONFIGURED_MESSAGE),
            AnalysisError::MissingInput(_) => AnalysisResult::rejected(MISSING_FIELDS_MESSAGE),
            AnalysisError::Model(err) => AnalysisResult::failure(err.to_string()),
            AnalysisError::Contract(err) => AnalysisResult::failure(err.to_string()),
        }
    }
}

/// Errors emitted by `TabService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TabServiceError {
    #[error(transparent)]
    Tab(#[from] TabError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StudyGateway` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by speech capabilities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpeechError {
    #[error("speech recognition is not supported here")]
    NotSupported,
    #[error("speech recognition failed: {0}")]
    Failed(String),
}

impl SpeechError {
    /// Short error code in the style of the web speech API.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            SpeechError::NotSupported => "not-supported",
            SpeechError::Failed(code) => code.as_str(),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
