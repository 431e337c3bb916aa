//! Attach command - adds a response button to an existing message.

use crate::commands::{CommandHandler, CommandInvocation, MANAGE_MESSAGES};
use crate::error::{AppResult, CommandError};
use crate::flags::ButtonOptions;
use crate::render::{
    component_id, render_buttons, Reply, MAX_BUTTONS_PER_MESSAGE, MAX_CUSTOM_ID_LEN,
    MAX_LABEL_LEN,
};
use async_trait::async_trait;
use button_store::{ButtonDefinition, ButtonRegistry};
use discord_client::{ApplicationCommand, ApplicationCommandOption, DiscordClient};
use std::sync::Arc;
use tracing::{info, warn};

const CHANNEL_NOT_FOUND: &str = "Couldn't fetch the message: Channel not found!";
const MESSAGE_NOT_FOUND: &str = "Couldn't fetch the message: Message not found!";

pub struct AddButtonHandler {
    discord: Arc<DiscordClient>,
    registry: ButtonRegistry,
}

impl AddButtonHandler {
    pub fn new(discord: Arc<DiscordClient>, registry: ButtonRegistry) -> Self {
        Self { discord, registry }
    }

    /// The channel must exist and belong to the guild the command came from.
    async fn check_channel(&self, channel_id: &str, guild_id: Option<&str>) -> AppResult<()> {
        let channel = self.discord.get_channel(channel_id).await.map_err(|e| {
            warn!("Channel lookup for {} failed: {}", channel_id, e);
            CommandError::ResourceNotFound(CHANNEL_NOT_FOUND.into())
        })?;

        match (channel.guild_id.as_deref(), guild_id) {
            (Some(owner), Some(guild)) if owner == guild => Ok(()),
            _ => Err(CommandError::ResourceNotFound(CHANNEL_NOT_FOUND.into()).into()),
        }
    }
}

fn validate_label(label: &str) -> Result<(), CommandError> {
    let len = label.chars().count();
    if len == 0 || len > MAX_LABEL_LEN {
        return Err(CommandError::UserInput(format!(
            "Button labels must be between 1 and {} characters.",
            MAX_LABEL_LEN
        )));
    }
    Ok(())
}

#[async_trait]
impl CommandHandler for AddButtonHandler {
    fn name(&self) -> &str {
        "addbutton"
    }

    /// Up to three REST calls happen before the answer.
    fn deferred(&self) -> bool {
        true
    }

    fn definition(&self) -> ApplicationCommand {
        ApplicationCommand {
            name: self.name().into(),
            description: "Attach a button to an existing message".into(),
            options: vec![
                ApplicationCommandOption::string("channel_id", "Channel of the message", true),
                ApplicationCommandOption::string("message_id", "Message to attach to", true),
                ApplicationCommandOption::string("label", "Button label", true),
                ApplicationCommandOption::string(
                    "options",
                    "--text <text> | --embedjson <json>, --ephemeral, --emoji <emoji>",
                    false,
                ),
            ],
            default_member_permissions: Some(MANAGE_MESSAGES.into()),
        }
    }

    async fn execute(&self, invocation: &CommandInvocation) -> AppResult<Reply> {
        let channel_id = invocation.require("channel_id")?.trim();
        let message_id = invocation.require("message_id")?.trim();
        let label = invocation.require("label")?.trim();

        let options = ButtonOptions::parse(invocation.option("options").unwrap_or_default())?;
        validate_label(label)?;

        let custom_id = component_id(label, &invocation.id);
        if custom_id.chars().count() > MAX_CUSTOM_ID_LEN {
            return Err(CommandError::UserInput("Button label is too long.".into()).into());
        }

        self.check_channel(channel_id, invocation.guild_id.as_deref())
            .await?;
        self.discord
            .get_message(channel_id, message_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CommandError::ResourceNotFound(MESSAGE_NOT_FOUND.into())
                } else {
                    CommandError::ResourceNotFound(format!("Couldn't fetch the message: {}", e))
                }
            })?;

        let definition = ButtonDefinition {
            label: label.to_string(),
            emoji: options.emoji.map(|e| e.to_string()),
            ephemeral: options.ephemeral,
            response: options.response,
        };

        let guard = self.registry.lock(message_id).await;
        let previous = guard.buttons().await?;
        if !previous.contains_key(&custom_id) && previous.len() >= MAX_BUTTONS_PER_MESSAGE {
            return Err(CommandError::UserInput(format!(
                "A message can carry at most {} buttons.",
                MAX_BUTTONS_PER_MESSAGE
            ))
            .into());
        }

        let mut buttons = previous.clone();
        buttons.insert(custom_id.clone(), definition);
        guard.set(buttons.clone()).await?;

        // A rejected button must not poison later edits of the same message.
        if let Err(e) = self
            .discord
            .edit_message_components(channel_id, message_id, render_buttons(&buttons))
            .await
        {
            warn!("Failed to edit message {}: {}", message_id, e);
            guard.set(previous).await?;
            return Err(
                CommandError::PlatformRejection("Failed to edit message with button.".into())
                    .into(),
            );
        }
        drop(guard);

        info!(
            "Attached button {} to message {} ({} total)",
            custom_id,
            message_id,
            buttons.len()
        );
        Ok(Reply::ephemeral_text("✅ Button added!"))
    }
}
