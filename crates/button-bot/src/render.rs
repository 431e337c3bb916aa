//! Rendering stored buttons and bot replies into Discord payloads.

use crate::emoji::ButtonEmoji;
use button_store::MessageButtons;
use discord_client::{
    ActionRow, Button, ButtonStyle, Embed, InteractionCallbackData, InteractionResponse,
    EPHEMERAL_FLAG, MAX_ACTION_ROWS, MAX_BUTTONS_PER_ROW,
};

/// Most buttons a single message can carry.
pub const MAX_BUTTONS_PER_MESSAGE: usize = MAX_ACTION_ROWS * MAX_BUTTONS_PER_ROW;

/// Longest label Discord accepts on a button.
pub const MAX_LABEL_LEN: usize = 80;

/// Longest component id Discord accepts.
pub const MAX_CUSTOM_ID_LEN: usize = 100;

/// Component id of a stored button: label plus the id of the invocation that
/// created it.
pub fn component_id(label: &str, invocation_id: &str) -> String {
    format!("btn_{}_{}", label, invocation_id)
}

/// Build the full component set for a message from its stored buttons.
pub fn render_buttons(buttons: &MessageButtons) -> Vec<ActionRow> {
    let buttons = buttons
        .iter()
        .map(|(custom_id, def)| {
            let emoji = def
                .emoji
                .as_deref()
                .and_then(ButtonEmoji::parse)
                .map(|e| e.to_component());

            Button::new(ButtonStyle::Secondary, def.label.clone(), custom_id.clone())
                .with_emoji(emoji)
        })
        .collect();

    ActionRow::layout(buttons)
}

/// A message sent in answer to an interaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub components: Vec<ActionRow>,
    pub ephemeral: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Text visible only to the invoking user.
    pub fn ephemeral_text(content: impl Into<String>) -> Self {
        Self::text(content).ephemeral(true)
    }

    pub fn embed(embed: Embed) -> Self {
        Self {
            embeds: vec![embed],
            ..Default::default()
        }
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }

    pub fn with_components(mut self, components: Vec<ActionRow>) -> Self {
        self.components = components;
        self
    }

    pub fn into_data(self) -> InteractionCallbackData {
        InteractionCallbackData {
            content: self.content,
            embeds: self.embeds,
            components: self.components,
            flags: self.ephemeral.then_some(EPHEMERAL_FLAG),
        }
    }

    pub fn into_response(self) -> InteractionResponse {
        InteractionResponse::message(self.into_data())
    }
}
