//! Common test utilities for integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use button_bot::api::{SignatureVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use button_bot::commands::CommandInvocation;
use button_store::{ButtonRegistry, MemoryStore};
use discord_client::DiscordClient;
use ed25519_dalek::{Signer, SigningKey};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GUILD_ID: &str = "42";
pub const CHANNEL_ID: &str = "100";
pub const MESSAGE_ID: &str = "200";

/// Start a mock Discord API server.
pub async fn mock_discord_server() -> MockServer {
    MockServer::start().await
}

/// Create a Discord client configured for a mock server.
pub fn test_discord_client(mock_server: &MockServer) -> Arc<DiscordClient> {
    Arc::new(
        DiscordClient::new(mock_server.uri(), "test-token", "app-1", Duration::from_secs(5))
            .unwrap(),
    )
}

/// Client for tests that never reach Discord.
pub fn offline_discord_client() -> Arc<DiscordClient> {
    Arc::new(
        DiscordClient::new("http://127.0.0.1:9", "test-token", "app-1", Duration::from_secs(1))
            .unwrap(),
    )
}

pub fn memory_registry() -> ButtonRegistry {
    ButtonRegistry::new(Arc::new(MemoryStore::new()))
}

/// Serve the test channel and message.
pub async fn mount_channel_and_message(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/channels/{}", CHANNEL_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": CHANNEL_ID,
            "type": 0,
            "guild_id": GUILD_ID,
            "name": "welcome"
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/channels/{}/messages/{}", CHANNEL_ID, MESSAGE_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(message_json()))
        .mount(mock_server)
        .await;
}

pub fn message_json() -> Value {
    json!({
        "id": MESSAGE_ID,
        "channel_id": CHANNEL_ID,
        "content": "Welcome to the server!"
    })
}

/// An `addbutton`/`removebutton` style invocation in the test guild.
pub fn invocation(id: &str, name: &str, options: &[(&str, &str)]) -> CommandInvocation {
    CommandInvocation {
        id: id.into(),
        name: name.into(),
        guild_id: Some(GUILD_ID.into()),
        channel_id: Some(CHANNEL_ID.into()),
        user_id: Some("7".into()),
        options: options
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Raw application command interaction.
pub fn command_interaction(id: &str, name: &str, options: &[(&str, &str)]) -> Value {
    let options: Vec<Value> = options
        .iter()
        .map(|(k, v)| json!({"name": k, "type": 3, "value": v}))
        .collect();

    json!({
        "id": id,
        "application_id": "app-1",
        "type": 2,
        "token": "interaction-token",
        "guild_id": GUILD_ID,
        "channel_id": CHANNEL_ID,
        "member": {"user": {"id": "7", "username": "moderator"}, "permissions": "8192"},
        "data": {"id": "cmd-1", "name": name, "type": 1, "options": options}
    })
}

/// Raw button click interaction.
pub fn click_interaction(message_id: &str, custom_id: &str) -> Value {
    json!({
        "id": "5000",
        "application_id": "app-1",
        "type": 3,
        "token": "interaction-token",
        "guild_id": GUILD_ID,
        "channel_id": CHANNEL_ID,
        "member": {"user": {"id": "8", "username": "member"}},
        "message": {"id": message_id, "channel_id": CHANNEL_ID, "content": "Welcome"},
        "data": {"custom_id": custom_id, "component_type": 2}
    })
}

/// Fixed signing key and the matching verifier.
pub fn test_keys() -> (SigningKey, SignatureVerifier) {
    let signing = SigningKey::from_bytes(&[7u8; 32]);
    let verifier =
        SignatureVerifier::from_hex(&hex::encode(signing.verifying_key().to_bytes())).unwrap();
    (signing, verifier)
}

/// A POST to the interactions endpoint signed the way Discord signs it.
pub fn signed_request(key: &SigningKey, body: &Value) -> Request<Body> {
    let body = body.to_string();
    let timestamp = "1700000000";
    let signature = key.sign(format!("{}{}", timestamp, body).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/interactions")
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, hex::encode(signature.to_bytes()))
        .header(TIMESTAMP_HEADER, timestamp)
        .body(Body::from(body))
        .unwrap()
}
