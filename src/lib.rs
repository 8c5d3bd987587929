//! travel-multiverse: LLM-backed destination and itinerary generation.
//!
//! Two stateless pipelines turn loosely-typed travel preferences into strict
//! JSON documents: a prompt is rendered from the request, sent once to a
//! text-completion service, and the completion is normalized back into JSON
//! with a fixed fallback document when it cannot be recovered.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use travel_multiverse::{router, AppState, GenerationConfig, OpenAIClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let state = AppState::new(
//!         Arc::new(OpenAIClient::new(api_key)),
//!         GenerationConfig::default(),
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```

extern crate self as travel_multiverse;

pub mod config;
pub mod error;
pub mod prompts;
pub mod schemas;
pub mod server;
pub mod services;
pub mod types;

pub use config::{GenerationConfig, ServiceConfig};
pub use error::{Result, TravelError};
pub use multiverse_macros::completion_schema;
pub use prompts::{build_destination_prompt, build_itinerary_prompts, ItineraryPrompts};
pub use schemas::{CompletionSchema, SchemaHandle, SchemaPolicy};
pub use server::{router, serve, AppState};
pub use services::{
    extract_json_object, generate_destinations, generate_itineraries, normalize_completion,
    normalize_document, ChatMessage, CompletionInput, CompletionRequest, CompletionService,
    NormalizeOutcome, Normalized, OpenAIClient, Role,
};
pub use types::{
    DayPlan, Destination, DestinationRequest, DestinationSet, Itineraries, ItineraryBundle,
    ItineraryRequest, Loose, MultiverseItineraries, Planner,
};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
