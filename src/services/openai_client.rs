use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::{ServiceConfig, DEFAULT_BASE_URL},
    error::{Result, TravelError},
    services::completion::{CompletionRequest, CompletionService},
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the OpenAI Responses API.
///
/// Every call is a single attempt: rate limits, provider errors and timeouts
/// are returned to the caller without retrying.
#[derive(Clone)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// POST the request to `/responses` and return the decoded response body.
    pub async fn create_response(&self, request: &CompletionRequest) -> Result<Value> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| {
                TravelError::Config(format!("Failed to build HTTP client: {err}"))
            })?;

        let request_url = build_responses_url(&self.base_url);
        debug!(
            target: "travel_multiverse::openai",
            url = %request_url,
            model = %request.model,
            "sending completion request"
        );

        let response = client
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let response_text = response.text().await.map_err(map_transport_error)?;

        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();

        if !status.is_success() {
            let api_message = response_json
                .as_ref()
                .and_then(|body| body.get("error"))
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or(response_text);

            return Err(TravelError::Completion(format!(
                "HTTP {} error: {}",
                status, api_message
            )));
        }

        let response_json = response_json.ok_or_else(|| {
            TravelError::Completion("Failed to parse provider response as JSON".to_string())
        })?;

        if let Some(error) = response_json.get("error").filter(|error| !error.is_null()) {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(TravelError::Completion(format!("API error: {}", error_message)));
        }

        Ok(response_json)
    }
}

#[async_trait]
impl CompletionService for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let response = self.create_response(&request).await?;
        Ok(extract_output_text(&response))
    }
}

/// Text of the first content item of the first output item, or `""` when
/// the response does not have that shape.
pub fn extract_output_text(response: &Value) -> String {
    response
        .get("output")
        .and_then(|output| output.get(0))
        .and_then(|item| item.get("content"))
        .and_then(|content| content.get(0))
        .and_then(|part| part.get("text"))
        .and_then(|text| text.as_str())
        .unwrap_or_default()
        .to_string()
}

fn build_responses_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/responses") {
        trimmed.to_string()
    } else {
        format!("{}/responses", trimmed)
    }
}

fn map_transport_error(err: reqwest::Error) -> TravelError {
    if err.is_timeout() {
        TravelError::Timeout(format!("Completion request timed out: {err}"))
    } else {
        TravelError::Http(err)
    }
}
