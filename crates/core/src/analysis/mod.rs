//! Analysis request construction and model reply handling.
//!
//! The request side turns tab fields into a single prompt; the response side
//! validates the model's JSON reply against the three-field feedback shape.

mod prompt;
mod request;
mod response;

pub use prompt::{
    BASIC_GUIDANCE, COMPLETE_GUIDANCE, COMPREHENSIVE_GUIDANCE, FACTS_CORRECTNESS_GUIDANCE,
    FALLBACK_GUIDANCE, analysis_instructions, build_prompt, detail_guidance,
};
pub use request::{AnalysisInputError, AnalysisRequest};
pub use response::{ResponseError, parse_model_reply, strip_line_breaks};
