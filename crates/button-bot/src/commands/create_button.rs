//! Preview command - shows what a role button would look like.

use crate::commands::{CommandHandler, CommandInvocation, MANAGE_MESSAGES};
use crate::emoji::ButtonEmoji;
use crate::error::{AppResult, CommandError};
use crate::flags::FlagSet;
use crate::render::Reply;
use async_trait::async_trait;
use discord_client::{ActionRow, ApplicationCommand, ApplicationCommandOption, Button, ButtonStyle};

pub struct CreateButtonHandler;

impl CreateButtonHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CreateButtonHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_style(raw: Option<&str>) -> Result<ButtonStyle, CommandError> {
    match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("primary") => Ok(ButtonStyle::Primary),
        Some("secondary") => Ok(ButtonStyle::Secondary),
        Some("success") => Ok(ButtonStyle::Success),
        Some("danger") => Ok(ButtonStyle::Danger),
        Some(other) => Err(CommandError::UserInput(format!(
            "Unknown style `{}`. Use primary, secondary, success or danger.",
            other
        ))),
    }
}

#[async_trait]
impl CommandHandler for CreateButtonHandler {
    fn name(&self) -> &str {
        "createbutton"
    }

    fn definition(&self) -> ApplicationCommand {
        ApplicationCommand {
            name: self.name().into(),
            description: "Preview a role button".into(),
            options: vec![
                ApplicationCommandOption::string("name", "Button name", true),
                ApplicationCommandOption::string("role", "Role id", true),
                ApplicationCommandOption::string(
                    "options",
                    "--label <label>, --emoji <emoji>, --style <style>",
                    false,
                ),
            ],
            default_member_permissions: Some(MANAGE_MESSAGES.into()),
        }
    }

    async fn execute(&self, invocation: &CommandInvocation) -> AppResult<Reply> {
        let name = invocation.require("name")?.trim();
        let role = invocation.require("role")?.trim();
        let flags = FlagSet::parse(invocation.option("options").unwrap_or_default());

        let style = parse_style(flags.style())?;
        let label = flags.label().filter(|l| !l.is_empty()).unwrap_or(name);
        let emoji = flags
            .emoji()
            .and_then(ButtonEmoji::parse)
            .map(|e| e.to_component());

        let button = Button::new(style, label, format!("preview_{}_{}", name, role)).with_emoji(emoji);

        Ok(Reply::ephemeral_text(format!("Preview of button `{}` for <@&{}>:", name, role))
            .with_components(vec![ActionRow::new(vec![button])]))
    }
}
