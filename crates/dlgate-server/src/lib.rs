//! `dlgate` HTTP server.
//!
//! Wires the core library to Axum: the gate middleware intercepts every
//! request before routing, the `/api` routes issue grants and CSRF
//! tokens, and the protected prefixes serve static assets from the
//! configured root. Exposed as a library so integration tests drive the
//! same app the binary serves.

pub mod config;
pub mod cookies;
pub mod error;
pub mod gate;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::middleware as axum_mw;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
///
/// The gate layer wraps the entire router, so it runs once per inbound
/// request, including requests to paths no route matches.
pub fn app(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(routes::csrf::router())
        .merge(routes::leads::router())
        .merge(routes::quotes::router());

    let mut router = Router::new().nest("/api", api).merge(routes::sys::router());

    // Each protected prefix serves its own subdirectory of the asset
    // root. Routing matches the raw (encoded) request path, so prefixes
    // with spaces are registered percent-encoded.
    for rule in &state.gate.prefixes {
        let dir = state.asset_root.join(rule.prefix.trim_start_matches('/'));
        router = router.nest_service(&encoded_prefix(&rule.prefix), ServeDir::new(dir));
    }

    router
        .layer(axum_mw::from_fn_with_state(
            Arc::clone(&state),
            gate::grant_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}

/// Percent-encode each segment of a decoded path prefix.
fn encoded_prefix(prefix: &str) -> String {
    prefix
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn encoded_prefix_preserves_plain_paths() {
        assert_eq!(encoded_prefix("/Broucher"), "/Broucher");
    }

    #[test]
    fn encoded_prefix_encodes_spaces() {
        assert_eq!(encoded_prefix("/Quotation Files"), "/Quotation%20Files");
    }
}
