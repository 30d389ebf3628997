//! Practice selection endpoint handlers

use axum::{extract::State, Json};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, PracticeSelectionRequest, PracticeSelectionResponse};
use crate::domain::exam::DomainCode;

/// POST /v1/practice/selections
///
/// Builds an even-split question set across the requested domains. Practice
/// sessions are allowed to under-deliver: shortfall is reported through
/// `totalSelected`, never as an error.
pub async fn create_selection(
    State(state): State<AppState>,
    Json(request): Json<PracticeSelectionRequest>,
) -> Result<Json<PracticeSelectionResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let domain_codes: Vec<DomainCode> = request
        .domain_codes
        .iter()
        .map(DomainCode::new)
        .collect::<Result<_, _>>()
        .map_err(|e| ApiError::bad_request(e.to_string()).with_param("domainCodes"))?;

    debug!(
        exam_key = %request.exam_key,
        domains = domain_codes.len(),
        question_count = request.question_count,
        "Creating practice selection"
    );

    let result = state
        .selection_service
        .select_by_domain_list(
            &request.exam_key,
            &domain_codes,
            request.question_count as usize,
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(PracticeSelectionResponse::from_domain(&result)))
}
