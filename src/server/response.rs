use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use crate::error::TravelError;

pub const DESTINATIONS_FAILURE: &str = "Failed to generate destinations";
pub const ITINERARIES_FAILURE: &str = "Failed to generate itineraries from the model";

/// Everything a generation endpoint can answer with besides a 200.
#[derive(Debug)]
pub(crate) enum EndpointError {
    MethodNotAllowed,
    InvalidBody(TravelError),
    /// The completion call failed; the cause is logged, never returned.
    GenerationFailed {
        message: &'static str,
        cause: TravelError,
    },
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        match self {
            EndpointError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(header::ALLOW, "POST")],
                Json(json!({ "error": "Method not allowed" })),
            )
                .into_response(),
            EndpointError::InvalidBody(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid request body", "detail": err.to_string() })),
            )
                .into_response(),
            EndpointError::GenerationFailed { message, cause } => {
                error!(
                    target: "travel_multiverse::server",
                    code = cause.error_code(),
                    error = %cause,
                    "LLM error"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}

pub(crate) fn json_ok(value: Value) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}
