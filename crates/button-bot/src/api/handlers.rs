//! HTTP request handlers.

use super::types::HealthResponse;
use super::AppState;
use crate::commands::CommandInvocation;
use crate::error::{AppError, AppResult};
use axum::{extract::State, Json};
use discord_client::{Interaction, InteractionResponse, InteractionType};
use tracing::{debug, error, info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let snapshot = state.registry.snapshot().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        messages: snapshot.len(),
        buttons: snapshot.values().map(|b| b.len()).sum(),
    }))
}

/// Interactions endpoint. Signatures are checked by middleware.
pub async fn interactions(
    State(state): State<AppState>,
    Json(interaction): Json<Interaction>,
) -> AppResult<Json<InteractionResponse>> {
    let response = match interaction.kind {
        InteractionType::Ping => InteractionResponse::pong(),
        InteractionType::ApplicationCommand => {
            let invocation = CommandInvocation::from_interaction(&interaction)
                .ok_or_else(|| AppError::InvalidRequest("Command name missing".into()))?;
            info!(
                command = %invocation.name,
                user = invocation.user_id.as_deref().unwrap_or("unknown"),
                "Command received"
            );
            if state.commands.defers(&invocation) {
                tokio::spawn(follow_up(state, invocation, interaction.token.clone()));
                InteractionResponse::deferred(true)
            } else {
                state.commands.handle(&invocation).await.into_response()
            }
        }
        InteractionType::MessageComponent => match state.dispatcher.dispatch(&interaction).await {
            Ok(Some(reply)) => reply.into_response(),
            Ok(None) => InteractionResponse::acknowledge(),
            Err(e) => {
                error!("Dispatch failed: {}", e);
                InteractionResponse::acknowledge()
            }
        },
        other => {
            return Err(AppError::InvalidRequest(format!(
                "Unsupported interaction type {:?}",
                other
            )))
        }
    };

    Ok(Json(response))
}

/// Run a deferred command and replace the "thinking" placeholder with its reply.
async fn follow_up(state: AppState, invocation: CommandInvocation, token: String) {
    let reply = state.commands.handle(&invocation).await;

    match state
        .discord
        .edit_original_response(&token, &reply.into_data())
        .await
    {
        Ok(_) => debug!(command = %invocation.name, "Deferred reply sent"),
        Err(e) => warn!(command = %invocation.name, "Failed to send deferred reply: {}", e),
    }
}
