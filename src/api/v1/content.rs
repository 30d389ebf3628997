//! Content availability endpoint handlers

use axum::{extract::State, Json};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, AvailabilityResponse};

/// GET /v1/content/availability
///
/// Operator-facing report: eligible question counts per blueprint domain,
/// flagging pools below the minimum threshold.
pub async fn availability(
    State(state): State<AppState>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    debug!("Fetching content availability report");

    let report = state
        .selection_service
        .availability_report()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AvailabilityResponse::from_domain(report)))
}
