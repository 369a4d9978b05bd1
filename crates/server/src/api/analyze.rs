use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use services::AnalysisError;
use study_core::analysis::AnalysisRequest;
use study_core::model::AnalysisResult;
use tracing::error;

use crate::AppState;

/// POST /analyze
///
/// Always answers with the feedback shape; the status code tells the
/// failure class apart.
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> (StatusCode, Json<AnalysisResult>) {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => {
            error!(error = %rejection, "unreadable analysis request");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalysisResult::failure(rejection.body_text())),
            );
        }
    };

    match state.analysis.analyze(&request).await {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                error!(error = %err, "analysis failed");
            }
            (status, Json(err.to_feedback()))
        }
    }
}

fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::MissingInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::analysis::AnalysisInputError;

    #[test]
    fn only_missing_input_is_a_client_error() {
        assert_eq!(
            status_for(&AnalysisError::MissingInput(AnalysisInputError::MissingInput)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&AnalysisError::NotConfigured),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
