//! Venue request signing.
//!
//! Authenticated venue requests carry an HMAC-SHA256 hex signature over
//! `verb + path + nonce + body`, alongside `api-key` and `api-nonce`
//! headers.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::error::VenueError;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 of `message` keyed with `secret`, hex encoded.
pub fn hmac_sha256_hex(secret: &str, message: &str) -> Result<String, VenueError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| VenueError::Signing(format!("failed to create HMAC: {e}")))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signature for one venue request. `path` must include the query string
/// when there is one; `body` is the exact serialized payload or empty.
pub fn sign_request(
    secret: &str,
    verb: &str,
    path: &str,
    nonce: i64,
    body: &str,
) -> Result<String, VenueError> {
    hmac_sha256_hex(secret, &format!("{verb}{path}{nonce}{body}"))
}
