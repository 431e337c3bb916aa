//! Discord client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscordError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Missing permissions: {0}")]
    Forbidden(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl DiscordError {
    /// Map a non-success response to an error variant.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => DiscordError::NotFound(message),
            403 => DiscordError::Forbidden(message),
            429 => DiscordError::RateLimited,
            _ => DiscordError::Api { status, message },
        }
    }

    /// Whether the error means the target resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiscordError::NotFound(_))
    }
}
