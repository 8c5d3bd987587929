//! HTTP surface: `POST /api/generate-destinations` and
//! `POST /api/generate-itineraries`.
//!
//! **Public API**: [`router`], [`serve`], [`serve_on_listener`].

mod handlers;
mod response;

use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::{GenerationConfig, ServiceConfig},
    error::Result,
    services::{CompletionService, OpenAIClient},
};

pub use response::{DESTINATIONS_FAILURE, ITINERARIES_FAILURE};

/// Shared, read-only state handed to every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub completion: Arc<dyn CompletionService>,
    pub generation: GenerationConfig,
}

impl AppState {
    pub fn new(completion: Arc<dyn CompletionService>, generation: GenerationConfig) -> Self {
        Self {
            completion,
            generation,
        }
    }

    /// State backed by the OpenAI client described by `config`.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            Arc::new(OpenAIClient::from_config(config)),
            config.generation.clone(),
        )
    }
}

/// Generation routes accept every method so that non-POST requests get the
/// JSON 405 body instead of the framework default.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/generate-destinations",
            any(handlers::generate_destinations),
        )
        .route(
            "/api/generate-itineraries",
            any(handlers::generate_itineraries),
        )
        .route("/api/health", get(handlers::health))
        .with_state(Arc::new(state))
}

/// Serve on an already-bound listener until Ctrl-C.
pub async fn serve_on_listener(listener: TcpListener, state: AppState) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(target: "travel_multiverse::server", "listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(target: "travel_multiverse::server", "server stopped");
    Ok(())
}

/// Bind `config.listen_addr` and serve with the OpenAI-backed state.
pub async fn serve(config: &ServiceConfig) -> Result<()> {
    let listener = TcpListener::bind(config.listen_addr).await?;
    serve_on_listener(listener, AppState::from_config(config)).await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until the process is killed.
        std::future::pending::<()>().await;
    }
    info!(target: "travel_multiverse::server", "shutdown signal received");
}
