//! HMAC-SHA256 Audit Signing
//!
//! Lets the audit service check that a record came from this console.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of a serialized record.
pub fn sign_payload(secret: &str, body: &[u8]) -> String {
    let tag = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length")
        .chain_update(body)
        .finalize();
    hex::encode(tag.into_bytes())
}

/// Value for the `X-Audit-Signature` header.
pub fn signature_header(secret: &str, payload: &[u8]) -> String {
    format!("sha256={}", sign_payload(secret, payload))
}
