//! Shared application state for the `dlgate` server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers and the gate middleware via `Arc`. Everything in it is
//! read-only after construction; there is no cross-request mutable
//! state anywhere in the server.

use std::path::PathBuf;
use std::sync::Arc;

use dlgate_core::clock::{Clock, SystemClock};
use dlgate_core::csrf::CsrfIssuer;
use dlgate_core::grant::GrantAuthority;

use crate::config::{Environment, ServerConfig};
use crate::gate::GateConfig;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Grant issuer/verifier.
    pub grants: GrantAuthority,
    /// CSRF token issuer.
    pub csrf: CsrfIssuer,
    /// Protected prefix table.
    pub gate: GateConfig,
    /// Directory the protected prefixes serve files from.
    pub asset_root: PathBuf,
    /// Download grant lifetime in seconds.
    pub grant_ttl_secs: u64,
    /// CSRF token lifetime in seconds.
    pub csrf_ttl_secs: u64,
    /// Inbox lead/quote notifications are composed for.
    pub lead_inbox: String,
    /// Whether issued cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
}

impl AppState {
    /// Build state from configuration, using the wall clock.
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Arc<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Arc::new(Self {
            grants: GrantAuthority::new(config.secret.clone(), Arc::clone(&clock)),
            csrf: CsrfIssuer::new(config.secret.clone(), clock),
            gate: GateConfig::default(),
            asset_root: config.asset_root.clone(),
            grant_ttl_secs: config.grant_ttl_secs,
            csrf_ttl_secs: config.csrf_ttl_secs,
            lead_inbox: config.lead_inbox.clone(),
            secure_cookies: config.environment == Environment::Production,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
