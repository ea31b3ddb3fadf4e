//! Signed, expiring download grants.
//!
//! A grant is a capability value `"{expires_at}.{tag}"` bound to a
//! resource class (`"brochure"`, `"quotes"`). The class is not carried in
//! the value; it is supplied again at verification and folded into the
//! signed message, so a grant minted for one class cannot be replayed
//! against another.
//!
//! # Security model
//!
//! - The tag is HMAC-SHA-256 over `"{class}:{expires_at}"`, base64url
//!   unpadded, keyed with the process-wide secret.
//! - Verification recomputes the tag and compares in constant time.
//! - Malformed, expired, and forged values all collapse to `false`; a
//!   failed verification discloses nothing about why it failed.
//! - Grants are stateless: no issued-grant registry exists, and a grant
//!   cannot be revoked before its expiry.

use std::sync::Arc;

use tracing::debug;

use crate::clock::Clock;
use crate::secret::SigningSecret;
use crate::sign;

/// Minimum grant lifetime. Guards against zero/negative TTL
/// misconfiguration minting an immediately dead grant.
const MIN_TTL_SECS: u64 = 1;

/// Issues and verifies download grants with a single secret and clock.
#[derive(Clone)]
pub struct GrantAuthority {
    secret: SigningSecret,
    clock: Arc<dyn Clock>,
}

impl GrantAuthority {
    /// Create an authority from an explicit secret and time source.
    #[must_use]
    pub fn new(secret: SigningSecret, clock: Arc<dyn Clock>) -> Self {
        Self { secret, clock }
    }

    /// Mint a grant for `class`, valid for `ttl_secs` (clamped to ≥ 1).
    #[must_use]
    pub fn issue(&self, class: &str, ttl_secs: u64) -> String {
        let ttl = ttl_secs.max(MIN_TTL_SECS);
        let expires_at = self.clock.now_unix().saturating_add_unsigned(ttl);
        let tag = sign::tag(&self.secret, &format!("{class}:{expires_at}"));
        format!("{expires_at}.{tag}")
    }

    /// Check a presented grant value against `class`.
    ///
    /// Never panics. A missing, malformed, expired, or forged value
    /// returns `false`; a grant is good through its final second
    /// (`now <= expires_at`).
    #[must_use]
    pub fn verify(&self, value: Option<&str>, class: &str) -> bool {
        let Some(value) = value else {
            return false;
        };
        let Some((exp_str, presented)) = value.split_once('.') else {
            return false;
        };
        if presented.is_empty() {
            return false;
        }
        let Ok(expires_at) = exp_str.parse::<i64>() else {
            return false;
        };
        if self.clock.now_unix() > expires_at {
            debug!(class, "grant expired");
            return false;
        }
        let expected = sign::tag(&self.secret, &format!("{class}:{expires_at}"));
        sign::tags_match(presented, &expected)
    }
}

impl std::fmt::Debug for GrantAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrantAuthority").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn authority(clock: Arc<ManualClock>) -> GrantAuthority {
        GrantAuthority::new(SigningSecret::new("test-secret"), clock)
    }

    #[test]
    fn issue_then_verify_succeeds() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(clock);
        for class in ["brochure", "quotes", "datasheet"] {
            let value = grants.issue(class, 120);
            assert!(grants.verify(Some(&value), class));
        }
    }

    #[test]
    fn grant_is_bound_to_its_class() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(clock);
        let value = grants.issue("brochure", 120);
        assert!(!grants.verify(Some(&value), "quotes"));
    }

    #[test]
    fn grant_expires_when_clock_passes_expiry() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(Arc::clone(&clock));
        let value = grants.issue("brochure", 1);

        // Valid through the final second.
        clock.advance(1);
        assert!(grants.verify(Some(&value), "brochure"));

        clock.advance(1);
        assert!(!grants.verify(Some(&value), "brochure"));
    }

    #[test]
    fn zero_ttl_is_clamped_to_one_second() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(clock);
        let value = grants.issue("brochure", 0);
        assert!(grants.verify(Some(&value), "brochure"));
    }

    #[test]
    fn tampering_any_signature_character_invalidates() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(clock);
        let value = grants.issue("brochure", 120);
        let dot = value.find('.').unwrap();

        for i in (dot + 1)..value.len() {
            let mut forged: Vec<u8> = value.clone().into_bytes();
            forged[i] = if forged[i] == b'A' { b'B' } else { b'A' };
            let forged = String::from_utf8(forged).unwrap();
            assert!(
                !grants.verify(Some(&forged), "brochure"),
                "tamper at byte {i} was accepted"
            );
        }
    }

    #[test]
    fn tampering_expiry_invalidates() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(clock);
        let value = grants.issue("brochure", 120);
        let (exp, tag) = value.split_once('.').unwrap();
        let extended = format!("{}.{tag}", exp.parse::<i64>().unwrap() + 3600);
        assert!(!grants.verify(Some(&extended), "brochure"));
    }

    #[test]
    fn malformed_values_are_rejected_without_panic() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(clock);
        for value in [
            None,
            Some(""),
            Some("garbage"),
            Some("."),
            Some("123."),
            Some(".abcdef"),
            Some("notanumber.abcdef"),
            Some("1e9.abcdef"),
            Some("9999999999999999999999999.abcdef"),
        ] {
            assert!(!grants.verify(value, "brochure"), "accepted {value:?}");
        }
    }

    #[test]
    fn truncated_value_is_rejected() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(clock);
        let value = grants.issue("brochure", 120);
        let truncated = &value[..value.len() - 1];
        assert!(!grants.verify(Some(truncated), "brochure"));
    }

    #[test]
    fn different_secrets_do_not_cross_verify() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let a = GrantAuthority::new(SigningSecret::new("a"), Arc::clone(&clock) as Arc<dyn Clock>);
        let b = GrantAuthority::new(SigningSecret::new("b"), clock);
        let value = a.issue("brochure", 120);
        assert!(!b.verify(Some(&value), "brochure"));
    }

    #[test]
    fn concurrent_verification_is_consistent() {
        let clock = Arc::new(ManualClock::at(1_700_000_000));
        let grants = authority(clock);
        let value = grants.issue("brochure", 120);

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let grants = grants.clone();
                let value = value.clone();
                std::thread::spawn(move || grants.verify(Some(&value), "brochure"))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
