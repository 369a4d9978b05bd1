mod feedback;
mod ids;
mod levels;
mod tab;

pub use feedback::{
    ANALYSIS_FAILED_MESSAGE, AnalysisResult, MISSING_FIELDS_MESSAGE, NOT_CONFIGURED_MESSAGE,
};
pub use ids::{ParseIdError, TabId};
pub use levels::{Accuracy, Language};
pub use tab::{TabDescriptor, TabError, TabFields, TabSet, default_title};
