//! Signing secret for grant and CSRF tags.
//!
//! The secret is process-wide: read once at startup, immutable after.
//! The inner bytes are zeroized on drop and never exposed in `Debug`
//! output.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL;
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The HMAC key shared by the grant and CSRF issuers.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret(String);

impl SigningSecret {
    /// Wrap an externally supplied secret string.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Generate a fresh 256-bit secret from the OS CSPRNG, base64url-encoded.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let encoded = BASE64URL.encode(bytes);
        bytes.zeroize();
        Self(encoded)
    }

    /// Borrow the raw key bytes for signing.
    ///
    /// Use with care — the caller must not log or persist these bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Expose the secret string. Only for operator output (`dlgate secret`).
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningSecret")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
