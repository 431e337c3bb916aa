//! Button definition types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Buttons attached to one message, keyed by component id, in display order.
pub type MessageButtons = IndexMap<String, ButtonDefinition>;

/// Every stored button, keyed by host message id.
pub type AssociationMap = IndexMap<String, MessageButtons>;

/// What a button answers with when clicked.
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonResponse {
    /// Plain message text.
    Text(String),
    /// Embed document as supplied by the moderator.
    Embed(serde_json::Value),
}

impl ButtonResponse {
    pub fn kind(&self) -> ResponseType {
        match self {
            ButtonResponse::Text(_) => ResponseType::Text,
            ButtonResponse::Embed(_) => ResponseType::Embed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Embed,
}

impl std::fmt::Display for ResponseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseType::Text => f.write_str("text"),
            ResponseType::Embed => f.write_str("embed"),
        }
    }
}

/// A button attached to a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredButton", into = "StoredButton")]
pub struct ButtonDefinition {
    pub label: String,
    /// Unicode emoji or custom emoji markup (`<:name:id>`).
    pub emoji: Option<String>,
    pub ephemeral: bool,
    pub response: ButtonResponse,
}

impl ButtonDefinition {
    pub fn text(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            emoji: None,
            ephemeral: false,
            response: ButtonResponse::Text(content.into()),
        }
    }

    pub fn embed(label: impl Into<String>, document: serde_json::Value) -> Self {
        Self {
            label: label.into(),
            emoji: None,
            ephemeral: false,
            response: ButtonResponse::Embed(document),
        }
    }

    pub fn with_emoji(mut self, emoji: Option<String>) -> Self {
        self.emoji = emoji;
        self
    }

    pub fn with_ephemeral(mut self, ephemeral: bool) -> Self {
        self.ephemeral = ephemeral;
        self
    }
}

/// Persisted shape of a button definition.
#[derive(Serialize, Deserialize)]
struct StoredButton {
    label: String,
    emoji: Option<String>,
    #[serde(default)]
    ephemeral: bool,
    response_type: ResponseType,
    content: serde_json::Value,
}

impl From<ButtonDefinition> for StoredButton {
    fn from(def: ButtonDefinition) -> Self {
        let (response_type, content) = match def.response {
            ButtonResponse::Text(text) => (ResponseType::Text, serde_json::Value::String(text)),
            ButtonResponse::Embed(document) => (ResponseType::Embed, document),
        };

        Self {
            label: def.label,
            emoji: def.emoji,
            ephemeral: def.ephemeral,
            response_type,
            content,
        }
    }
}

impl TryFrom<StoredButton> for ButtonDefinition {
    type Error = String;

    fn try_from(stored: StoredButton) -> Result<Self, Self::Error> {
        let response = match (stored.response_type, stored.content) {
            (ResponseType::Text, serde_json::Value::String(text)) => ButtonResponse::Text(text),
            (ResponseType::Text, other) => {
                return Err(format!("text button content must be a string, got {}", other))
            }
            (ResponseType::Embed, document) => ButtonResponse::Embed(document),
        };

        Ok(Self {
            label: stored.label,
            emoji: stored.emoji,
            ephemeral: stored.ephemeral,
            response,
        })
    }
}
