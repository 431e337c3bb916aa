//! List command - shows the buttons stored for a message.

use crate::commands::{CommandHandler, CommandInvocation, MANAGE_MESSAGES};
use crate::error::AppResult;
use crate::render::Reply;
use async_trait::async_trait;
use button_store::ButtonRegistry;
use discord_client::{ApplicationCommand, ApplicationCommandOption};
use std::fmt::Write;

pub struct ListButtonsHandler {
    registry: ButtonRegistry,
}

impl ListButtonsHandler {
    pub fn new(registry: ButtonRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl CommandHandler for ListButtonsHandler {
    fn name(&self) -> &str {
        "listbuttons"
    }

    fn definition(&self) -> ApplicationCommand {
        ApplicationCommand {
            name: self.name().into(),
            description: "List the buttons stored for a message".into(),
            options: vec![ApplicationCommandOption::string(
                "message_id",
                "Message carrying the buttons",
                true,
            )],
            default_member_permissions: Some(MANAGE_MESSAGES.into()),
        }
    }

    async fn execute(&self, invocation: &CommandInvocation) -> AppResult<Reply> {
        let message_id = invocation.require("message_id")?.trim();
        let buttons = self.registry.buttons(message_id).await?;

        if buttons.is_empty() {
            return Ok(Reply::ephemeral_text("No buttons stored for this message."));
        }

        let mut text = format!("**Buttons on {}:**\n", message_id);
        for (custom_id, def) in &buttons {
            let _ = write!(
                text,
                "\n- {}{} `{}` ({}",
                def.emoji.as_deref().map(|e| format!("{} ", e)).unwrap_or_default(),
                def.label,
                custom_id,
                def.response.kind()
            );
            text.push_str(if def.ephemeral { ", ephemeral)" } else { ")" });
        }

        Ok(Reply::ephemeral_text(text))
    }
}
