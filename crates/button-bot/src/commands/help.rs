//! Help command - displays available commands.

use crate::commands::{CommandHandler, CommandInvocation};
use crate::error::AppResult;
use crate::render::Reply;
use async_trait::async_trait;
use discord_client::ApplicationCommand;

pub struct HelpHandler;

impl HelpHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HelpHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for HelpHandler {
    fn name(&self) -> &str {
        "help"
    }

    fn definition(&self) -> ApplicationCommand {
        ApplicationCommand {
            name: self.name().into(),
            description: "Show how to use the button commands".into(),
            options: vec![],
            default_member_permissions: None,
        }
    }

    async fn execute(&self, _invocation: &CommandInvocation) -> AppResult<Reply> {
        Ok(Reply::ephemeral_text(
            r#"**Message Buttons**

**Commands:**
- /addbutton <channel_id> <message_id> <label> [options] - Attach a button to a message
- /removebutton <channel_id> <message_id> <label> - Remove a button
- /listbuttons <message_id> - Show the buttons stored for a message
- /createbutton <name> <role> [options] - Preview a role button
- /ephemeraltest - Try an ephemeral answer
- /help - Show this message

**Options for addbutton:**
- `--text <text>` - Answer with plain text
- `--embedjson <json>` - Answer with an embed, e.g. `{"title": "Rules", "color": 5814783}`
- `--ephemeral` - Only the clicking user sees the answer
- `--emoji <emoji>` - Unicode emoji or `<:name:id>`

A value runs until the next `--`, so text and JSON cannot contain `--`."#,
        ))
    }
}
