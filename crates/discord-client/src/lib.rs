//! Discord REST API client and interaction types.

mod client;
mod error;
mod types;

pub use client::DiscordClient;
pub use error::DiscordError;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_client(mock_server: &MockServer) -> DiscordClient {
        DiscordClient::new(mock_server.uri(), "test-token", "app-1", Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/@me"))
            .and(header("Authorization", "Bot test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "bot-1",
                "username": "buttons"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(client.health_check().await);
    }

    #[tokio::test]
    async fn test_health_check_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/@me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(!client.health_check().await);
    }

    #[tokio::test]
    async fn test_get_channel() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels/100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "100",
                "type": 0,
                "guild_id": "42",
                "name": "general"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let channel = client.get_channel("100").await.unwrap();

        assert_eq!(channel.id, "100");
        assert_eq!(channel.guild_id.as_deref(), Some("42"));
        assert_eq!(channel.name.as_deref(), Some("general"));
    }

    #[tokio::test]
    async fn test_get_channel_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels/404"))
            .respond_with(
                ResponseTemplate::new(404).set_body_string(r#"{"message": "Unknown Channel"}"#),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.get_channel("404").await;

        assert!(matches!(result, Err(DiscordError::NotFound(_))));
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_message() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/channels/100/messages/200"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "200",
                "channel_id": "100",
                "content": "Pick a role",
                "author": {"id": "bot-1", "username": "buttons"},
                "components": [{"type": 1, "components": [{"type": 3, "custom_id": "select"}]}]
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let message = client.get_message("100", "200").await.unwrap();

        assert_eq!(message.id, "200");
        assert_eq!(message.content, "Pick a role");
    }

    #[tokio::test]
    async fn test_edit_message_components() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/channels/100/messages/200"))
            .and(body_json(serde_json::json!({
                "components": [{
                    "type": 1,
                    "components": [{
                        "type": 2,
                        "style": 2,
                        "label": "Rules",
                        "custom_id": "btn_Rules_1",
                        "emoji": {"name": "📜"}
                    }]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "200",
                "channel_id": "100",
                "content": ""
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let button = Button::new(ButtonStyle::Secondary, "Rules", "btn_Rules_1").with_emoji(Some(
            ComponentEmoji {
                id: None,
                name: Some("📜".into()),
                animated: false,
            },
        ));

        let result = client
            .edit_message_components("100", "200", ActionRow::layout(vec![button]))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_edit_message_forbidden() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/channels/100/messages/200"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_string(r#"{"message": "Cannot edit a message authored by another user"}"#),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.edit_message_components("100", "200", vec![]).await;

        assert!(matches!(result, Err(DiscordError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_register_guild_commands() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/applications/app-1/guilds/42/commands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "c1", "name": "help", "description": "Show help", "type": 1}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let commands = vec![ApplicationCommand {
            name: "help".into(),
            description: "Show help".into(),
            options: vec![],
            default_member_permissions: None,
        }];

        let registered = client.register_commands(Some("42"), &commands).await.unwrap();
        assert_eq!(registered.len(), 1);
        assert_eq!(registered[0].name, "help");
    }

    #[tokio::test]
    async fn test_register_global_commands_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/applications/app-1/commands"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client.register_commands(None, &[]).await;

        assert!(matches!(result, Err(DiscordError::RateLimited)));
    }

    #[test]
    fn test_action_row_layout_chunks_by_five() {
        let buttons: Vec<Button> = (0..12)
            .map(|i| Button::new(ButtonStyle::Secondary, format!("b{}", i), format!("id{}", i)))
            .collect();

        let rows = ActionRow::layout(buttons);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].components.len(), 5);
        assert_eq!(rows[1].components.len(), 5);
        assert_eq!(rows[2].components.len(), 2);
        assert_eq!(rows[2].components[1].custom_id.as_deref(), Some("id11"));
    }

    #[test]
    fn test_interaction_component_deserialization() {
        let json = serde_json::json!({
            "id": "900",
            "application_id": "app-1",
            "type": 3,
            "token": "tok",
            "guild_id": "42",
            "channel_id": "100",
            "member": {"user": {"id": "7", "username": "alice"}, "permissions": "8"},
            "message": {"id": "200", "channel_id": "100", "content": "hi"},
            "data": {"custom_id": "btn_Rules_1", "component_type": 2}
        });

        let interaction: Interaction = serde_json::from_value(json).unwrap();

        assert_eq!(interaction.kind, InteractionType::MessageComponent);
        assert_eq!(interaction.message.as_ref().unwrap().id, "200");
        assert_eq!(
            interaction.data.as_ref().unwrap().custom_id.as_deref(),
            Some("btn_Rules_1")
        );
        assert_eq!(interaction.invoker().unwrap().username, "alice");
    }

    #[test]
    fn test_interaction_command_options() {
        let json = serde_json::json!({
            "id": "901",
            "application_id": "app-1",
            "type": 2,
            "token": "tok",
            "user": {"id": "7", "username": "alice"},
            "data": {
                "id": "c1",
                "name": "addbutton",
                "options": [
                    {"name": "channel_id", "type": 3, "value": "100"},
                    {"name": "label", "type": 3, "value": "Rules"}
                ]
            }
        });

        let interaction: Interaction = serde_json::from_value(json).unwrap();
        let options = interaction.string_options();

        assert_eq!(interaction.kind, InteractionType::ApplicationCommand);
        assert_eq!(options.get("channel_id").map(String::as_str), Some("100"));
        assert_eq!(options.get("label").map(String::as_str), Some("Rules"));
        assert_eq!(interaction.invoker().unwrap().id, "7");
    }

    #[test]
    fn test_unknown_button_style_rejected() {
        let result: Result<ButtonStyle, _> = serde_json::from_str("9");
        assert!(result.is_err());
    }

    #[test]
    fn test_ephemeral_response_serialization() {
        let response = InteractionResponse::message(InteractionCallbackData {
            content: Some("only you".into()),
            flags: Some(EPHEMERAL_FLAG),
            ..Default::default()
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": 4, "data": {"content": "only you", "flags": 64}})
        );
    }

    #[test]
    fn test_pong_serialization() {
        let json = serde_json::to_value(InteractionResponse::pong()).unwrap();
        assert_eq!(json, serde_json::json!({"type": 1}));
    }

    #[test]
    fn test_deferred_response_serialization() {
        let json = serde_json::to_value(InteractionResponse::deferred(true)).unwrap();
        assert_eq!(json, serde_json::json!({"type": 5, "data": {"flags": 64}}));
    }

    #[tokio::test]
    async fn test_edit_original_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/webhooks/app-1/interaction-token/messages/@original"))
            .and(body_json(serde_json::json!({"content": "✅ Button added!"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "300",
                "channel_id": "100",
                "content": "✅ Button added!"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let data = InteractionCallbackData {
            content: Some("✅ Button added!".into()),
            ..Default::default()
        };
        let message = client
            .edit_original_response("interaction-token", &data)
            .await
            .unwrap();

        assert_eq!(message.id, "300");
    }

    #[tokio::test]
    async fn test_edit_original_response_expired_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/webhooks/app-1/old-token/messages/@original"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Unknown Webhook"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let result = client
            .edit_original_response("old-token", &InteractionCallbackData::default())
            .await;

        assert!(result.unwrap_err().is_not_found());
    }
}
