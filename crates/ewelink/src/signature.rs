//! Request signing for the eWeLink cloud API.
//!
//! Every authenticated call carries an `X-CK-Nonce` header, and the OAuth
//! flow signs its payloads with HMAC-SHA256 keyed by the app secret. The
//! signature travels base64-encoded, either as the `authorization` query
//! parameter of the login page or as an `Authorization: Sign ...` header.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the base64-encoded HMAC-SHA256 signature of `payload` keyed
/// by the app secret.
pub fn sign(app_secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Generates the 8-character alphanumeric nonce the eWeLink API expects
/// in `X-CK-Nonce` and on the login page URL.
pub fn nonce() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
