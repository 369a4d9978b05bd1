use crate::analysis::request::{AnalysisInputError, AnalysisRequest};
use crate::model::Accuracy;

/// Opening line of the `basic` instructions.
pub const BASIC_GUIDANCE: &str = "Focus ONLY on checking if these facts are covered in the response:";
/// Opening line of the `facts_correctness` instructions.
pub const FACTS_CORRECTNESS_GUIDANCE: &str = "Focus on facts coverage and their correctness:";
/// Opening line of the `complete` instructions.
pub const COMPLETE_GUIDANCE: &str = "Provide a complete analysis including:";
/// Opening line of the `comprehensive` instructions.
pub const COMPREHENSIVE_GUIDANCE: &str = "Provide a comprehensive review including:";
/// Instructions used for an unrecognized level.
pub const FALLBACK_GUIDANCE: &str = "Focus on facts coverage and basic accuracy.";

const STUDENT_FALLBACK: &str = "The student";

/// Level-specific analysis instructions.
///
/// Only the `basic` level repeats the facts list, because its whole check is
/// a per-fact coverage list.
#[must_use]
pub fn analysis_instructions(accuracy: Accuracy, bullet_points: &str) -> String {
    match accuracy {
        Accuracy::Basic => format!(
            "{BASIC_GUIDANCE}\n\
             {bullet_points}\n\
             \n\
             Analyze only:\n\
             1. Are all required facts mentioned? (yes/no for each fact)\n\
             2. If any facts are missing, list them\n\
             \n\
             Keep the feedback very simple and focused only on fact coverage."
        ),
        Accuracy::FactsCorrectness => format!(
            "{FACTS_CORRECTNESS_GUIDANCE}\n\
             1. Are all required facts mentioned? (check each fact)\n\
             2. Is the information correct for each mentioned fact?\n\
             3. If any facts are incorrect, what's wrong?\n\
             \n\
             Keep the feedback focused on facts and their accuracy."
        ),
        Accuracy::Complete => format!(
            "{COMPLETE_GUIDANCE}\n\
             1. Facts coverage and accuracy\n\
             2. Basic language structure\n\
             3. Logical flow of information\n\
             4. Brief suggestions for improvement\n\
             \n\
             Provide balanced feedback on both content and presentation."
        ),
        Accuracy::Comprehensive => format!(
            "{COMPREHENSIVE_GUIDANCE}\n\
             1. Detailed analysis of facts coverage and accuracy\n\
             2. Grammar and sentence structure\n\
             3. Academic language level evaluation\n\
             4. Logical organization of content\n\
             5. Detailed suggestions for improvement\n\
             6. Examples of better formulations where appropriate\n\
             \n\
             Provide thorough feedback on all aspects of the response."
        ),
        Accuracy::Unspecified => FALLBACK_GUIDANCE.to_string(),
    }
}

/// What the `details` field of the reply has to cover at each level.
#[must_use]
pub fn detail_guidance(accuracy: Accuracy) -> &'static str {
    match accuracy {
        Accuracy::Basic => "Focus ONLY on fact coverage.",
        Accuracy::FactsCorrectness => "Focus on facts coverage and accuracy.",
        Accuracy::Complete => "Provide complete analysis of content and basic structure.",
        Accuracy::Comprehensive | Accuracy::Unspecified => {
            "Provide comprehensive analysis of all aspects."
        }
    }
}

/// Compose the single user message sent to the model.
///
/// Free-text fields are interpolated verbatim. The prepared draft is not part
/// of the prompt.
///
/// # Errors
///
/// Returns `AnalysisInputError::MissingInput` if the facts list or the spoken
/// answer is empty.
pub fn build_prompt(request: &AnalysisRequest) -> Result<String, AnalysisInputError> {
    request.validate()?;

    let language = request.language.prompt_name();
    let student = if request.student_name.is_empty() {
        STUDENT_FALLBACK
    } else {
        request.student_name.as_str()
    };
    let instructions = analysis_instructions(request.accuracy, &request.bullet_points);
    let details = detail_guidance(request.accuracy);

    Ok(format!(
        "Please analyze this student's test preparation response in {language} and address the student with its name.\n\
         IMPORTANT: {student} is in grade {grade} (Gymnasium) in Berlin.\n\
         This is a speech-to-text response, so it naturally lacks punctuation.\n\
         \n\
         Topic: {topic}\n\
         \n\
         Required facts to cover:\n\
         {bullets}\n\
         \n\
         Student's spoken response:\n\
         {spoken}\n\
         \n\
         {instructions}\n\
         \n\
         Return your analysis in this exact JSON format:\n\
         {{\n  \
           \"success\": boolean indicating if the response meets the requirements for this analysis level,\n  \
           \"message\": \"brief, clear assessment in {language}, focusing only on the requested analysis aspects\",\n  \
           \"details\": \"detailed feedback in {language} that strictly follows the analysis level requirements specified above. {details}\"\n\
         }}",
        grade = request.school_grade,
        topic = request.topic,
        bullets = request.bullet_points,
        spoken = request.spoken_text,
    ))
}
