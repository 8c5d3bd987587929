#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request},
    response::Response,
    Router,
};
use travel_multiverse::{
    router, AppState, CompletionRequest, CompletionService, GenerationConfig, SchemaPolicy,
    TravelError,
};

const BODY_LIMIT: usize = 1_048_576;

/// Completion service that replays a scripted reply and records every call.
#[derive(Debug)]
pub struct RecordingCompletion {
    reply: Result<String, String>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl RecordingCompletion {
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for RecordingCompletion {
    async fn complete(&self, request: CompletionRequest) -> travel_multiverse::Result<String> {
        self.calls.lock().unwrap().push(request);
        self.reply.clone().map_err(TravelError::Completion)
    }
}

pub fn test_router(service: Arc<RecordingCompletion>) -> Router {
    test_router_with_policy(service, SchemaPolicy::PassThrough)
}

pub fn test_router_with_policy(service: Arc<RecordingCompletion>, policy: SchemaPolicy) -> Router {
    let generation = GenerationConfig {
        schema_policy: policy,
        ..GenerationConfig::default()
    };
    router(AppState::new(service, generation))
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}
