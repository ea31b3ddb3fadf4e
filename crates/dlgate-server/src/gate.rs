//! Request gate for protected download paths.
//!
//! Runs on every inbound request, before routing. When the decoded path
//! falls under a protected prefix, the prefix's designated cookie must
//! carry a valid grant for its resource class; otherwise the request is
//! answered with a bare 403 and never reaches a handler. Every failure
//! mode (missing cookie, malformed header, undecodable path, bad
//! signature) denies. The gate fails closed, never open, and never
//! produces a 500.

use std::borrow::Cow;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::cookies;
use crate::state::AppState;

/// Resource class tag for brochure downloads.
pub const BROCHURE_CLASS: &str = "brochure";
/// Cookie carrying the brochure grant.
pub const BROCHURE_COOKIE: &str = "svs_dl_brochure";
/// Resource class tag for quote documents.
pub const QUOTES_CLASS: &str = "quotes";
/// Cookie carrying the quotes grant.
pub const QUOTES_COOKIE: &str = "svs_dl_quotes";

/// A protected path prefix and the grant that unlocks it.
#[derive(Debug, Clone)]
pub struct ProtectedPrefix {
    /// Decoded path prefix, e.g. `/Quotation Files`.
    pub prefix: String,
    /// Cookie the grant is presented in.
    pub cookie_name: String,
    /// Resource class the grant must be bound to.
    pub resource_class: String,
}

/// Static table mapping protected prefixes to their grants.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub prefixes: Vec<ProtectedPrefix>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            prefixes: vec![
                ProtectedPrefix {
                    // Historic spelling; matches the published asset URLs.
                    prefix: "/Broucher".to_owned(),
                    cookie_name: BROCHURE_COOKIE.to_owned(),
                    resource_class: BROCHURE_CLASS.to_owned(),
                },
                ProtectedPrefix {
                    prefix: "/Quotation Files".to_owned(),
                    cookie_name: QUOTES_COOKIE.to_owned(),
                    resource_class: QUOTES_CLASS.to_owned(),
                },
            ],
        }
    }
}

impl GateConfig {
    /// Find the protected prefix covering `raw_path`.
    ///
    /// Matches the percent-decoded path first (prefixes may contain
    /// spaces), then the raw path as a fallback, since clients and
    /// proxies disagree on pre-decoding. A path that fails to decode is matched
    /// raw only.
    #[must_use]
    pub fn match_path(&self, raw_path: &str) -> Option<&ProtectedPrefix> {
        let decoded: Cow<'_, str> =
            urlencoding::decode(raw_path).unwrap_or(Cow::Borrowed(raw_path));
        self.prefixes
            .iter()
            .find(|p| decoded.starts_with(&p.prefix) || raw_path.starts_with(&p.prefix))
    }
}

/// Middleware gating protected prefixes behind a valid grant cookie.
pub async fn grant_gate(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();

    let Some(rule) = state.gate.match_path(&path) else {
        return next.run(req).await;
    };

    let value = cookies::value(req.headers(), &rule.cookie_name);
    if state.grants.verify(value.as_deref(), &rule.resource_class) {
        next.run(req).await
    } else {
        debug!(path = %path, class = %rule.resource_class, "download grant denied");
        deny()
    }
}

/// The denial response: bare 403, no reason leakage.
fn deny() -> Response {
    (StatusCode::FORBIDDEN, "forbidden").into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn matches_decoded_prefix_with_space() {
        let gate = GateConfig::default();
        let rule = gate.match_path("/Quotation%20Files/offer.pdf").unwrap();
        assert_eq!(rule.resource_class, QUOTES_CLASS);
    }

    #[test]
    fn matches_raw_prefix() {
        let gate = GateConfig::default();
        let rule = gate.match_path("/Broucher/file.pdf").unwrap();
        assert_eq!(rule.cookie_name, BROCHURE_COOKIE);
    }

    #[test]
    fn unprotected_paths_do_not_match() {
        let gate = GateConfig::default();
        assert!(gate.match_path("/api/leads").is_none());
        assert!(gate.match_path("/").is_none());
    }

    #[test]
    fn undecodable_path_falls_back_to_raw_match() {
        let gate = GateConfig::default();
        // `%ff` is not valid UTF-8 once decoded; raw matching still applies.
        assert!(gate.match_path("/Broucher/%ff").is_some());
        assert!(gate.match_path("/elsewhere/%ff").is_none());
    }
}
