//! Discord REST client.

use crate::error::DiscordError;
use crate::types::*;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Discord REST API client authenticated as a bot.
///
/// The bot token is held as a `SecretString` so it never shows up in logs.
#[derive(Clone)]
pub struct DiscordClient {
    client: Client,
    base_url: String,
    token: SecretString,
    application_id: String,
}

impl DiscordClient {
    /// Create a new Discord client.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        application_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DiscordError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: SecretString::new(token.into()),
            application_id: application_id.into(),
        })
    }

    /// Get the configured application id.
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", format!("Bot {}", self.token.expose_secret()))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, DiscordError> {
        let status = response.status();
        if !status.is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(DiscordError::from_status(status.as_u16(), msg));
        }

        Ok(response.json().await?)
    }

    /// Check that the API is reachable and the token is accepted.
    pub async fn health_check(&self) -> bool {
        self.authorized(self.client.get(format!("{}/users/@me", self.base_url)))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Get a channel by id.
    #[instrument(skip(self))]
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel, DiscordError> {
        let response = self
            .authorized(
                self.client
                    .get(format!("{}/channels/{}", self.base_url, channel_id)),
            )
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Fetch a single message from a channel.
    #[instrument(skip(self))]
    pub async fn get_message(
        &self,
        channel_id: &str,
        message_id: &str,
    ) -> Result<Message, DiscordError> {
        let response = self
            .authorized(self.client.get(format!(
                "{}/channels/{}/messages/{}",
                self.base_url, channel_id, message_id
            )))
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Replace the component set of a message.
    #[instrument(skip(self, components), fields(rows = components.len()))]
    pub async fn edit_message_components(
        &self,
        channel_id: &str,
        message_id: &str,
        components: Vec<ActionRow>,
    ) -> Result<Message, DiscordError> {
        let request = EditMessageRequest { components };

        let response = self
            .authorized(self.client.patch(format!(
                "{}/channels/{}/messages/{}",
                self.base_url, channel_id, message_id
            )))
            .json(&request)
            .send()
            .await?;

        let message: Message = Self::parse(response).await.map_err(|e| {
            warn!("Edit of message {} failed: {}", message_id, e);
            e
        })?;

        debug!("Edited components of message {}", message_id);
        Ok(message)
    }

    /// Overwrite the bot's slash commands, globally or for one guild.
    #[instrument(skip(self, commands), fields(count = commands.len()))]
    pub async fn register_commands(
        &self,
        guild_id: Option<&str>,
        commands: &[ApplicationCommand],
    ) -> Result<Vec<ApplicationCommand>, DiscordError> {
        let url = match guild_id {
            Some(guild) => format!(
                "{}/applications/{}/guilds/{}/commands",
                self.base_url, self.application_id, guild
            ),
            None => format!(
                "{}/applications/{}/commands",
                self.base_url, self.application_id
            ),
        };

        let response = self
            .authorized(self.client.put(url))
            .json(commands)
            .send()
            .await?;

        let registered: Vec<ApplicationCommand> = Self::parse(response).await?;
        debug!("Registered {} commands", registered.len());
        Ok(registered)
    }

    /// Replace the original response of a deferred interaction.
    #[instrument(skip(self, interaction_token, data))]
    pub async fn edit_original_response(
        &self,
        interaction_token: &str,
        data: &InteractionCallbackData,
    ) -> Result<Message, DiscordError> {
        let response = self
            .client
            .patch(format!(
                "{}/webhooks/{}/{}/messages/@original",
                self.base_url, self.application_id, interaction_token
            ))
            .json(data)
            .send()
            .await?;

        Self::parse(response).await
    }
}
