//! Request signature verification and logging middleware.

use crate::error::AppError;
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use ed25519_dalek::{Signature, VerifyingKey};
use std::sync::Arc;
use tracing::{debug, warn};

pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Interaction payloads are small; anything larger is rejected.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Verifies Discord's Ed25519 signature over `timestamp || body`.
#[derive(Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    /// Build a verifier from the application's hex-encoded public key.
    pub fn from_hex(public_key: &str) -> Result<Self, AppError> {
        let bytes: [u8; 32] = hex::decode(public_key.trim())
            .map_err(|e| anyhow::anyhow!("Public key is not valid hex: {}", e))?
            .try_into()
            .map_err(|_| anyhow::anyhow!("Public key must be 32 bytes"))?;

        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|e| anyhow::anyhow!("Invalid public key: {}", e))?;

        Ok(Self { key })
    }

    pub fn verify(&self, timestamp: &str, body: &[u8], signature: &str) -> Result<(), AppError> {
        let bytes: [u8; 64] = hex::decode(signature.trim())
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or(AppError::InvalidSignature)?;
        let signature = Signature::from_bytes(&bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify_strict(&message, &signature)
            .map_err(|_| AppError::InvalidSignature)
    }
}

/// Reject requests whose signature does not match their body.
pub async fn verify_signature(
    State(verifier): State<Arc<SignatureVerifier>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (parts, body) = request.into_parts();

    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let (Some(signature), Some(timestamp)) = (header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER))
    else {
        warn!("Interaction request without signature headers");
        return Err(AppError::InvalidSignature);
    };

    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

    if let Err(e) = verifier.verify(&timestamp, &bytes, &signature) {
        warn!("Rejected interaction with bad signature");
        return Err(e);
    }

    debug!("Signature verified");
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Logging middleware for requests.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    debug!(%method, %uri, "Request started");

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %uri, %status, ?duration, "Request failed");
    }

    response
}
