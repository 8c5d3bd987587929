use std::{net::SocketAddr, time::Duration};

use crate::{
    error::{Result, TravelError},
    schemas::SchemaPolicy,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_DESTINATION_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_ITINERARY_MODEL: &str = "gpt-4.1";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Per-request generation settings shared by both pipelines.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub destination_model: String,
    pub itinerary_model: String,
    pub schema_policy: SchemaPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            destination_model: DEFAULT_DESTINATION_MODEL.to_string(),
            itinerary_model: DEFAULT_ITINERARY_MODEL.to_string(),
            schema_policy: SchemaPolicy::PassThrough,
        }
    }
}

/// Process-wide configuration, read once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub listen_addr: SocketAddr,
    pub generation: GenerationConfig,
}

impl ServiceConfig {
    /// Build the configuration from process environment variables.
    ///
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_BASE_URL` (default `https://api.openai.com/v1`)
    /// - `TRAVEL_DESTINATION_MODEL` (default `gpt-4.1-mini`)
    /// - `TRAVEL_ITINERARY_MODEL` (default `gpt-4.1`)
    /// - `TRAVEL_REQUEST_TIMEOUT_SECS` (default 120)
    /// - `TRAVEL_LISTEN_ADDR` (default `127.0.0.1:3000`)
    /// - `TRAVEL_SCHEMA_POLICY` (`pass-through` or `strict`, default `pass-through`)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                TravelError::Config(
                    "OPENAI_API_KEY environment variable must be set before starting the service"
                        .to_string(),
                )
            })?;

        let base_url = lookup("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("TRAVEL_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|err| {
                TravelError::Config(format!("TRAVEL_REQUEST_TIMEOUT_SECS is invalid: {err}"))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let listen_raw =
            lookup("TRAVEL_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw.trim().parse::<SocketAddr>().map_err(|err| {
            TravelError::Config(format!("TRAVEL_LISTEN_ADDR `{listen_raw}` is invalid: {err}"))
        })?;

        let schema_policy = match lookup("TRAVEL_SCHEMA_POLICY") {
            Some(raw) => raw.parse::<SchemaPolicy>()?,
            None => SchemaPolicy::PassThrough,
        };

        let defaults = GenerationConfig::default();
        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            listen_addr,
            generation: GenerationConfig {
                destination_model: lookup("TRAVEL_DESTINATION_MODEL")
                    .unwrap_or(defaults.destination_model),
                itinerary_model: lookup("TRAVEL_ITINERARY_MODEL")
                    .unwrap_or(defaults.itinerary_model),
                schema_policy,
            },
        })
    }
}
