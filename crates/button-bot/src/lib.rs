//! Message Buttons - attach response buttons to existing Discord messages.
//!
//! Moderators attach buttons with slash commands; each click is answered
//! with stored text or a stored embed, optionally visible only to the
//! clicking user. Commands and clicks arrive as signed interactions on an
//! HTTP endpoint.

pub mod api;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod emoji;
pub mod error;
pub mod flags;
pub mod render;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{AppError, AppResult, CommandError};
pub use render::Reply;

use crate::commands::*;
use button_store::ButtonRegistry;
use discord_client::DiscordClient;
use std::sync::Arc;

/// Every slash command the bot serves.
pub fn command_router(
    discord: Arc<DiscordClient>,
    registry: ButtonRegistry,
    buttons: &config::ButtonsConfig,
) -> CommandRouter {
    CommandRouter::new(vec![
        Box::new(AddButtonHandler::new(discord.clone(), registry.clone())),
        Box::new(
            RemoveButtonHandler::new(discord, registry.clone())
                .with_remove_match(buttons.remove_match)
                .with_rerender(buttons.rerender_on_remove),
        ),
        Box::new(ListButtonsHandler::new(registry)),
        Box::new(CreateButtonHandler::new()),
        Box::new(EphemeralTestHandler::new()),
        Box::new(HelpHandler::new()),
    ])
}
