//! API response types.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Messages carrying at least one stored button.
    pub messages: usize,
    pub buttons: usize,
}
