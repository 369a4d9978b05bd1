use study_core::model::AnalysisResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackTone {
    Success,
    Failure,
}

impl FeedbackTone {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            FeedbackTone::Success => "feedback-overview feedback-overview--success",
            FeedbackTone::Failure => "feedback-overview feedback-overview--failure",
        }
    }
}

/// Feedback panel content for one analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub tone: FeedbackTone,
    pub overview: String,
    pub details: Option<String>,
}

impl FeedbackVm {
    #[must_use]
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            tone: if result.success {
                FeedbackTone::Success
            } else {
                FeedbackTone::Failure
            },
            overview: result.message.clone(),
            details: result
                .details
                .as_ref()
                .filter(|details| !details.trim().is_empty())
                .cloned(),
        }
    }
}
