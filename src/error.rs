use thiserror::Error;

/// Main error type for the generation service
#[derive(Error, Debug)]
pub enum TravelError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Completion service error: {0}")]
    Completion(String),

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, TravelError>;

impl TravelError {
    /// Whether the failure came from talking to the completion service.
    ///
    /// Every such failure is reported to callers as a single generic
    /// "generation failed" response, regardless of cause.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            TravelError::Completion(_)
                | TravelError::Http(_)
                | TravelError::Timeout(_)
                | TravelError::Serialization(_)
        )
    }

    /// Get the error code used in operational logs
    pub fn error_code(&self) -> &'static str {
        match self {
            TravelError::Config(_) => "CONFIG_ERROR",
            TravelError::Completion(_) => "COMPLETION_ERROR",
            TravelError::Http(_) => "HTTP_ERROR",
            TravelError::Serialization(_) => "SERIALIZATION_ERROR",
            TravelError::Validation(_) => "VALIDATION_ERROR",
            TravelError::Timeout(_) => "TIMEOUT_ERROR",
            TravelError::InvalidRequest(_) => "INVALID_REQUEST",
            TravelError::Io(_) => "IO_ERROR",
        }
    }
}
