//! Remove command - deletes a stored button.

use crate::commands::{CommandHandler, CommandInvocation, MANAGE_MESSAGES};
use crate::config::RemoveMatch;
use crate::error::AppResult;
use crate::render::{component_id, render_buttons, Reply};
use async_trait::async_trait;
use button_store::{ButtonRegistry, StoreError};
use discord_client::{ApplicationCommand, ApplicationCommandOption, DiscordClient};
use std::sync::Arc;
use tracing::{info, warn};

pub struct RemoveButtonHandler {
    discord: Arc<DiscordClient>,
    registry: ButtonRegistry,
    remove_match: RemoveMatch,
    rerender: bool,
}

impl RemoveButtonHandler {
    pub fn new(discord: Arc<DiscordClient>, registry: ButtonRegistry) -> Self {
        Self {
            discord,
            registry,
            remove_match: RemoveMatch::default(),
            rerender: false,
        }
    }

    pub fn with_remove_match(mut self, remove_match: RemoveMatch) -> Self {
        self.remove_match = remove_match;
        self
    }

    /// Push the remaining buttons to the live message after a removal.
    pub fn with_rerender(mut self, rerender: bool) -> Self {
        self.rerender = rerender;
        self
    }

    async fn remove(
        &self,
        message_id: &str,
        label: &str,
        invocation_id: &str,
    ) -> AppResult<Option<String>> {
        match self.remove_match {
            RemoveMatch::Invocation => {
                let custom_id = component_id(label, invocation_id);
                let removed = self.registry.remove(message_id, &custom_id).await?;
                Ok(removed.map(|_| custom_id))
            }
            RemoveMatch::Label => {
                let removed = self
                    .registry
                    .update(message_id, |buttons| {
                        let key = buttons
                            .iter()
                            .find(|(_, def)| def.label == label)
                            .map(|(id, _)| id.clone());
                        if let Some(key) = &key {
                            buttons.shift_remove(key);
                        }
                        Ok::<_, StoreError>(key)
                    })
                    .await?;
                Ok(removed)
            }
        }
    }
}

#[async_trait]
impl CommandHandler for RemoveButtonHandler {
    fn name(&self) -> &str {
        "removebutton"
    }

    fn deferred(&self) -> bool {
        self.rerender
    }

    fn definition(&self) -> ApplicationCommand {
        ApplicationCommand {
            name: self.name().into(),
            description: "Remove a button from a message".into(),
            options: vec![
                ApplicationCommandOption::string("channel_id", "Channel of the message", true),
                ApplicationCommandOption::string("message_id", "Message carrying the button", true),
                ApplicationCommandOption::string("label", "Button label", true),
            ],
            default_member_permissions: Some(MANAGE_MESSAGES.into()),
        }
    }

    async fn execute(&self, invocation: &CommandInvocation) -> AppResult<Reply> {
        let channel_id = invocation.require("channel_id")?.trim();
        let message_id = invocation.require("message_id")?.trim();
        let label = invocation.require("label")?.trim();

        let Some(custom_id) = self.remove(message_id, label, &invocation.id).await? else {
            return Ok(Reply::ephemeral_text("Button not found."));
        };
        info!("Removed button {} from message {}", custom_id, message_id);

        if self.rerender {
            let remaining = self.registry.buttons(message_id).await?;
            if let Err(e) = self
                .discord
                .edit_message_components(channel_id, message_id, render_buttons(&remaining))
                .await
            {
                warn!("Failed to update message {} after removal: {}", message_id, e);
                return Ok(Reply::ephemeral_text(
                    "Button removed, but the message could not be updated.",
                ));
            }
        }

        Ok(Reply::ephemeral_text("Button removed."))
    }
}
