//! API request/response types

mod error;
mod selection;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use selection::{
    ApiAnswer, ApiQuestion, AvailabilityResponse, DiagnosticSelectionRequest,
    DiagnosticSelectionResponse, PracticeSelectionRequest, PracticeSelectionResponse,
};
