//! Stateless CSRF tokens (double-submit cookie).
//!
//! A token is `"{nonce}.{expires_at}.{tag}"` where the tag covers
//! `"csrf:{nonce}:{expires_at}"` with the same keyed-hash routine the
//! download grants use. The issuer sets the token as a cookie and hands
//! it to the client; a form submission must echo the token, and
//! acceptance requires the echo to equal the cookie and the cookie to
//! carry a valid, unexpired tag. No server-side token registry exists.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::clock::Clock;
use crate::secret::SigningSecret;
use crate::sign;

/// Random nonce length in bytes before encoding.
const NONCE_LEN: usize = 16;

/// Minimum token lifetime, mirroring the grant clamp.
const MIN_TTL_SECS: u64 = 1;

/// Issues and checks double-submit CSRF tokens.
#[derive(Clone)]
pub struct CsrfIssuer {
    secret: SigningSecret,
    clock: Arc<dyn Clock>,
}

impl CsrfIssuer {
    /// Create an issuer from an explicit secret and time source.
    #[must_use]
    pub fn new(secret: SigningSecret, clock: Arc<dyn Clock>) -> Self {
        Self { secret, clock }
    }

    /// Mint a fresh token valid for `ttl_secs` (clamped to ≥ 1).
    #[must_use]
    pub fn issue(&self, ttl_secs: u64) -> String {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = BASE64URL.encode(nonce_bytes);

        let expires_at = self
            .clock
            .now_unix()
            .saturating_add_unsigned(ttl_secs.max(MIN_TTL_SECS));
        let tag = sign::tag(&self.secret, &format!("csrf:{nonce}:{expires_at}"));
        format!("{nonce}.{expires_at}.{tag}")
    }

    /// Accept a submission iff the echoed token equals the cookie token
    /// and the cookie token is authentic and unexpired.
    ///
    /// Never panics; every failure mode returns `false`.
    #[must_use]
    pub fn accept(&self, cookie: Option<&str>, submitted: Option<&str>) -> bool {
        let (Some(cookie), Some(submitted)) = (cookie, submitted) else {
            return false;
        };
        if !sign::tags_match(cookie, submitted) {
            return false;
        }
        self.verify(cookie)
    }

    /// Check a single token's signature and expiry.
    fn verify(&self, token: &str) -> bool {
        let mut parts = token.splitn(3, '.');
        let (Some(nonce), Some(exp_str), Some(tag)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        let Ok(expires_at) = exp_str.parse::<i64>() else {
            return false;
        };
        if self.clock.now_unix() > expires_at {
            return false;
        }
        let expected = sign::tag(&self.secret, &format!("csrf:{nonce}:{expires_at}"));
        sign::tags_match(tag, &expected)
    }
}

impl std::fmt::Debug for CsrfIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfIssuer").finish_non_exhaustive()
    }
}
