//! Answers button clicks with their stored response.

use crate::commands::{EphemeralTestHandler, EPHEMERAL_TEST_ID};
use crate::error::AppResult;
use crate::render::Reply;
use button_store::{ButtonRegistry, ButtonResponse};
use discord_client::{Embed, Interaction, InteractionType};
use tracing::{debug, instrument, warn};

pub struct Dispatcher {
    registry: ButtonRegistry,
}

impl Dispatcher {
    pub fn new(registry: ButtonRegistry) -> Self {
        Self { registry }
    }

    /// Reply to a component interaction.
    ///
    /// `None` means there is nothing to say: not a click, or a button with
    /// no stored definition.
    #[instrument(skip(self, interaction), fields(interaction_id = %interaction.id))]
    pub async fn dispatch(&self, interaction: &Interaction) -> AppResult<Option<Reply>> {
        if interaction.kind != InteractionType::MessageComponent {
            return Ok(None);
        }

        let Some(custom_id) = interaction.data.as_ref().and_then(|d| d.custom_id.as_deref())
        else {
            return Ok(None);
        };

        if custom_id == EPHEMERAL_TEST_ID {
            return Ok(Some(EphemeralTestHandler::click_reply()));
        }

        let Some(message_id) = interaction.message.as_ref().map(|m| m.id.as_str()) else {
            return Ok(None);
        };

        let Some(definition) = self.registry.get(message_id, custom_id).await? else {
            debug!("No button {} stored for message {}", custom_id, message_id);
            return Ok(None);
        };

        let reply = match definition.response {
            ButtonResponse::Text(content) => Reply::text(content).ephemeral(definition.ephemeral),
            ButtonResponse::Embed(document) => match serde_json::from_value::<Embed>(document) {
                Ok(embed) => Reply::embed(embed).ephemeral(definition.ephemeral),
                Err(e) => {
                    warn!("Stored embed for {} is invalid: {}", custom_id, e);
                    Reply::ephemeral_text(format!("Error sending embed: {}", e))
                }
            },
        };

        Ok(Some(reply))
    }
}
