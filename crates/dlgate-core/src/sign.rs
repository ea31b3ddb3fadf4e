//! Shared keyed-hash routine for grant and CSRF tags.
//!
//! One implementation serves both issuance and verification, so the two
//! sides can never drift: HMAC-SHA-256 over the message, base64url
//! without padding, compared in constant time.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::secret::SigningSecret;

type HmacSha256 = Hmac<Sha256>;

/// Compute the authentication tag for `message`.
///
/// Returns a 43-character base64url string (256-bit MAC, unpadded).
#[must_use]
pub fn tag(secret: &SigningSecret, message: &str) -> String {
    // HMAC-SHA-256 accepts keys of any length, so this cannot fail.
    // An empty tag on the unreachable branch can never verify.
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return String::new();
    };
    mac.update(message.as_bytes());
    BASE64URL.encode(mac.finalize().into_bytes())
}

/// Constant-time equality over two encoded tags.
///
/// Requires equal length; every byte participates in the comparison
/// rather than short-circuiting at the first difference.
#[must_use]
pub fn tags_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
