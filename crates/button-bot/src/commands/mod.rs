//! Slash command handlers.

mod add_button;
mod create_button;
mod help;
mod list_buttons;
mod remove_button;

pub use add_button::AddButtonHandler;
pub use create_button::CreateButtonHandler;
pub use ephemeral_test::{EphemeralTestHandler, EPHEMERAL_TEST_ID};
pub use help::HelpHandler;
pub use list_buttons::ListButtonsHandler;
pub use remove_button::RemoveButtonHandler;

use crate::error::{AppError, AppResult, CommandError};
use crate::render::Reply;
use async_trait::async_trait;
use discord_client::{ApplicationCommand, Interaction};
use std::collections::HashMap;
use tracing::{debug, error};

/// `MANAGE_MESSAGES`, required for commands that touch other users' messages.
pub const MANAGE_MESSAGES: &str = "8192";

/// A slash command invocation, flattened out of its interaction.
#[derive(Debug, Clone, Default)]
pub struct CommandInvocation {
    /// Interaction id; buttons created by this invocation embed it.
    pub id: String,
    pub name: String,
    pub guild_id: Option<String>,
    pub channel_id: Option<String>,
    pub user_id: Option<String>,
    pub options: HashMap<String, String>,
}

impl CommandInvocation {
    /// Returns `None` when the interaction carries no command name.
    pub fn from_interaction(interaction: &Interaction) -> Option<Self> {
        let name = interaction.data.as_ref()?.name.clone()?;

        Some(Self {
            id: interaction.id.clone(),
            name,
            guild_id: interaction.guild_id.clone(),
            channel_id: interaction.channel_id.clone(),
            user_id: interaction.invoker().map(|u| u.id.clone()),
            options: interaction.string_options(),
        })
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> Result<&str, CommandError> {
        self.option(name)
            .ok_or_else(|| CommandError::UserInput(format!("Missing argument `{}`", name)))
    }
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name as registered with Discord (e.g., "addbutton").
    fn name(&self) -> &str;

    /// Registration payload for this command.
    fn definition(&self) -> ApplicationCommand;

    /// Whether the command answers after Discord's response window may have
    /// closed. Deferred commands reply ephemerally through a follow-up edit.
    fn deferred(&self) -> bool {
        false
    }

    /// Check if this handler matches the invocation.
    fn matches(&self, invocation: &CommandInvocation) -> bool {
        invocation.name == self.name()
    }

    /// Execute the command.
    async fn execute(&self, invocation: &CommandInvocation) -> AppResult<Reply>;
}

/// Routes invocations to their handler and turns failures into replies.
pub struct CommandRouter {
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl CommandRouter {
    pub fn new(handlers: Vec<Box<dyn CommandHandler>>) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registration payloads of every handler.
    pub fn definitions(&self) -> Vec<ApplicationCommand> {
        self.handlers.iter().map(|h| h.definition()).collect()
    }

    /// Whether the matching handler answers through a deferred response.
    pub fn defers(&self, invocation: &CommandInvocation) -> bool {
        self.handlers
            .iter()
            .find(|h| h.matches(invocation))
            .is_some_and(|h| h.deferred())
    }

    /// Run the matching handler. Never fails: errors become ephemeral replies.
    pub async fn handle(&self, invocation: &CommandInvocation) -> Reply {
        let Some(handler) = self.handlers.iter().find(|h| h.matches(invocation)) else {
            debug!("No handler for command {}", invocation.name);
            return Reply::ephemeral_text("Unknown command.");
        };

        match handler.execute(invocation).await {
            Ok(reply) => reply,
            Err(AppError::Command(e)) => {
                debug!("Command {} rejected: {}", invocation.name, e);
                Reply::ephemeral_text(e.to_string())
            }
            Err(e) => {
                error!("Handler error: {}", e);
                Reply::ephemeral_text("Sorry, something went wrong.")
            }
        }
    }
}
