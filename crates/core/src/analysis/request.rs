use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Accuracy, Language, TabFields};

/// Errors raised while validating an analysis request.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnalysisInputError {
    #[error("required facts and spoken text must not be empty")]
    MissingInput,
}

/// Wire shape of an analysis request.
///
/// Missing string fields decode as empty; accuracy and language decode
/// leniently (see `Accuracy::from_label` and `Language::from_label`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisRequest {
    pub topic: String,
    pub student_name: String,
    pub school_grade: String,
    pub accuracy: Accuracy,
    pub bullet_points: String,
    pub prepared_text: String,
    pub spoken_text: String,
    pub language: Language,
}

impl AnalysisRequest {
    /// Check the only two required inputs: the facts list and the spoken answer.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisInputError::MissingInput` if either is empty.
    pub fn validate(&self) -> Result<(), AnalysisInputError> {
        if self.bullet_points.is_empty() || self.spoken_text.is_empty() {
            return Err(AnalysisInputError::MissingInput);
        }
        Ok(())
    }
}

impl From<&TabFields> for AnalysisRequest {
    fn from(fields: &TabFields) -> Self {
        Self {
            topic: fields.topic.clone(),
            student_name: fields.student_name.clone(),
            school_grade: fields.school_grade.clone(),
            accuracy: fields.accuracy,
            bullet_points: fields.bullet_points.clone(),
            prepared_text: fields.prepared_text.clone(),
            spoken_text: fields.spoken_text.clone(),
            language: fields.language,
        }
    }
}
