//! v1 API - selection endpoints

pub mod content;
pub mod diagnostic;
pub mod practice;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/diagnostic/selections", post(diagnostic::create_selection))
        .route("/practice/selections", post(practice::create_selection))
        .route("/content/availability", get(content::availability))
}
