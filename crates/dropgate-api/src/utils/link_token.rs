//! Stateless link tokens.
//!
//! A token carries everything needed to serve a download without a registry
//! row: bucket, object key and expiry, signed with HMAC-SHA256. Wire format
//! is `base64url(json payload) "." base64url(tag)`, both without padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use dropgate_core::models::TokenPayload;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    InvalidSignature,
}

/// Encode and sign a payload with the given secret.
pub fn encode(payload: &TokenPayload, secret: &str) -> String {
    let json = serde_json::to_vec(payload).expect("token payload serializes");
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(&json);
    let tag = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(&json),
        URL_SAFE_NO_PAD.encode(tag)
    )
}

/// Verify the signature and decode the payload.
///
/// The tag comparison is constant-time (`Mac::verify_slice`). Expiry is not
/// checked here; callers decide how to treat an expired payload.
pub fn decode(token: &str, secret: &str) -> Result<TokenPayload, TokenError> {
    let (payload_b64, tag_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;

    let json = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| TokenError::Malformed)?;
    let tag = URL_SAFE_NO_PAD
        .decode(tag_b64)
        .map_err(|_| TokenError::Malformed)?;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(&json);
    mac.verify_slice(&tag)
        .map_err(|_| TokenError::InvalidSignature)?;

    serde_json::from_slice(&json).map_err(|_| TokenError::Malformed)
}
