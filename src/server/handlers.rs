use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Method, Request},
    response::Response,
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use super::{
    response::{json_ok, EndpointError, DESTINATIONS_FAILURE, ITINERARIES_FAILURE},
    AppState,
};
use crate::{
    error::TravelError,
    services::{generate_destinations as run_destinations, generate_itineraries as run_itineraries},
    types::{DestinationRequest, ItineraryRequest},
};

const BODY_LIMIT: usize = 1_048_576;

pub(super) async fn generate_destinations(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Result<Response, EndpointError> {
    let body: DestinationRequest = read_post_body(request).await?;

    let normalized = run_destinations(state.completion.as_ref(), &state.generation, &body)
        .await
        .map_err(|cause| EndpointError::GenerationFailed {
            message: DESTINATIONS_FAILURE,
            cause,
        })?;

    Ok(json_ok(normalized.value))
}

pub(super) async fn generate_itineraries(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Result<Response, EndpointError> {
    let body: ItineraryRequest = read_post_body(request).await?;

    let normalized = run_itineraries(state.completion.as_ref(), &state.generation, &body)
        .await
        .map_err(|cause| EndpointError::GenerationFailed {
            message: ITINERARIES_FAILURE,
            cause,
        })?;

    Ok(json_ok(normalized.value))
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Reject non-POST requests, then decode the body. The method check runs
/// before the body is read.
async fn read_post_body<T>(request: Request<Body>) -> Result<T, EndpointError>
where
    T: DeserializeOwned + Default,
{
    if request.method() != Method::POST {
        debug!(
            target: "travel_multiverse::server",
            method = %request.method(),
            uri = %request.uri(),
            "rejecting non-POST request"
        );
        return Err(EndpointError::MethodNotAllowed);
    }

    let bytes = to_bytes(request.into_body(), BODY_LIMIT)
        .await
        .map_err(|err| {
            EndpointError::InvalidBody(TravelError::InvalidRequest(format!(
                "failed to read body: {err}"
            )))
        })?;

    parse_body(&bytes).map_err(EndpointError::InvalidBody)
}

/// Decode a preference record. An empty or `null` body means every field is absent.
pub(super) fn parse_body<T>(bytes: &[u8]) -> Result<T, TravelError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| TravelError::InvalidRequest(format!("body is not valid JSON: {err}")))?;

    match value {
        Value::Null => Ok(T::default()),
        Value::Object(_) => serde_path_to_error::deserialize(value).map_err(|err| {
            TravelError::InvalidRequest(format!("invalid field at {}: {}", err.path(), err))
        }),
        _ => Err(TravelError::InvalidRequest(
            "body must be a JSON object".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_body() {
        let request: DestinationRequest = parse_body(b"").unwrap();
        assert_eq!(request.budget(), "medium");

        let request: ItineraryRequest = parse_body(b"  null ").unwrap();
        assert_eq!(request.effective_days(), 3);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(parse_body::<DestinationRequest>(b"[1, 2]").is_err());
        assert!(parse_body::<DestinationRequest>(b"\"beach\"").is_err());
        assert!(parse_body::<DestinationRequest>(b"{not json").is_err());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let request: ItineraryRequest =
            parse_body(br#"{"days": "4", "unexpected": {"nested": true}}"#).unwrap();
        assert_eq!(request.effective_days(), 4);
    }
}
