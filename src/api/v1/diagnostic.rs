//! Diagnostic selection endpoint handlers

use axum::{extract::State, Json};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, DiagnosticSelectionRequest, DiagnosticSelectionResponse};

/// POST /v1/diagnostic/selections
///
/// Builds a blueprint-weighted question set for a diagnostic exam. Fails
/// with 422 when the content store cannot supply the full requested count:
/// a diagnostic must never silently serve fewer questions than promised.
pub async fn create_selection(
    State(state): State<AppState>,
    Json(request): Json<DiagnosticSelectionRequest>,
) -> Result<Json<DiagnosticSelectionResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("questionCount"))?;

    debug!(
        question_count = request.question_count,
        "Creating diagnostic selection"
    );

    let result = state
        .selection_service
        .select_by_blueprint(request.question_count as usize)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(DiagnosticSelectionResponse::from_domain(&result)))
}
