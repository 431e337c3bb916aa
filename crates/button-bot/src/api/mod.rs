//! HTTP interactions endpoint.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{
    logging_middleware, verify_signature, SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
pub use types::*;

use crate::commands::CommandRouter;
use crate::dispatcher::Dispatcher;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use button_store::ButtonRegistry;
use discord_client::DiscordClient;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Slash command handlers
    pub commands: Arc<CommandRouter>,
    /// Button click dispatcher
    pub dispatcher: Arc<Dispatcher>,
    /// Discord client, for follow-ups of deferred commands
    pub discord: Arc<DiscordClient>,
    /// Stored buttons
    pub registry: ButtonRegistry,
    /// Request signature verifier
    pub verifier: Arc<SignatureVerifier>,
}

impl AppState {
    pub fn new(
        commands: CommandRouter,
        discord: Arc<DiscordClient>,
        registry: ButtonRegistry,
        verifier: SignatureVerifier,
    ) -> Self {
        Self {
            commands: Arc::new(commands),
            dispatcher: Arc::new(Dispatcher::new(registry.clone())),
            discord,
            registry,
            verifier: Arc::new(verifier),
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let interactions = Router::new()
        .route("/interactions", post(handlers::interactions))
        .layer(axum_middleware::from_fn_with_state(
            state.verifier.clone(),
            verify_signature,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(interactions)
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
