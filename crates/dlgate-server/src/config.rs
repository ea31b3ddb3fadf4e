//! Server configuration for `dlgate`.
//!
//! Loaded from environment variables once at startup. The signing secret
//! is mandatory in production: a deployment without an explicit secret
//! refuses to start instead of silently substituting a default anyone
//! can read in the source.

use std::net::SocketAddr;
use std::path::PathBuf;

use dlgate_core::secret::SigningSecret;

/// Development-only fallback secret. Never gates a real deployment;
/// production startup fails without an explicit `DLGATE_SECRET`.
const DEV_FALLBACK_SECRET: &str = "dlgate-dev-secret-do-not-deploy";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development: fallback secret allowed, cookies not `Secure`.
    Development,
    /// Production (the default): explicit secret required.
    Production,
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No signing secret configured outside development.
    #[error(
        "DLGATE_SECRET is not set; refusing to start in production without an explicit signing secret"
    )]
    MissingSecret,

    /// The bind address could not be parsed.
    #[error("invalid bind address '{addr}': {reason}")]
    InvalidBindAddr { addr: String, reason: String },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Deployment environment.
    pub environment: Environment,
    /// Signing secret for grants and CSRF tokens.
    pub secret: SigningSecret,
    /// Directory the protected prefixes serve files from.
    pub asset_root: PathBuf,
    /// Download grant lifetime in seconds.
    pub grant_ttl_secs: u64,
    /// CSRF token lifetime in seconds.
    pub csrf_ttl_secs: u64,
    /// Inbox lead/quote notifications are composed for.
    pub lead_inbox: String,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DLGATE_ENV` — `production` (default) or `development`
    /// - `DLGATE_SECRET` — signing secret (required in production)
    /// - `PORT` — port to bind on (binds to `0.0.0.0`)
    /// - `DLGATE_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8300`)
    /// - `DLGATE_ASSET_ROOT` — gated asset directory (default: `./assets`)
    /// - `DLGATE_GRANT_TTL` — grant lifetime seconds (default: `300`)
    /// - `DLGATE_CSRF_TTL` — CSRF token lifetime seconds (default: `3600`)
    /// - `DLGATE_LEAD_INBOX` — notification inbox (default: `leads@localhost`)
    /// - `DLGATE_LOG_LEVEL` — log filter (default: `info`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSecret`] when no secret is set in
    /// production, or [`ConfigError::InvalidBindAddr`] for an
    /// unparseable `DLGATE_BIND_ADDR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match std::env::var("DLGATE_ENV").as_deref() {
            Ok("development" | "dev") => Environment::Development,
            _ => Environment::Production,
        };

        let secret = resolve_secret(std::env::var("DLGATE_SECRET").ok(), environment)?;

        // Priority: DLGATE_BIND_ADDR > PORT > default 127.0.0.1:8300
        let bind_addr = if let Ok(addr) = std::env::var("DLGATE_BIND_ADDR") {
            addr.parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                    addr,
                    reason: e.to_string(),
                })?
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8300);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8300))
        };

        let asset_root = std::env::var("DLGATE_ASSET_ROOT")
            .map_or_else(|_| PathBuf::from("./assets"), PathBuf::from);

        let grant_ttl_secs = std::env::var("DLGATE_GRANT_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let csrf_ttl_secs = std::env::var("DLGATE_CSRF_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let lead_inbox =
            std::env::var("DLGATE_LEAD_INBOX").unwrap_or_else(|_| "leads@localhost".to_owned());

        let log_level = std::env::var("DLGATE_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        Ok(Self {
            bind_addr,
            environment,
            secret,
            asset_root,
            grant_ttl_secs,
            csrf_ttl_secs,
            lead_inbox,
            log_level,
        })
    }
}

/// Resolve the signing secret for the given environment.
///
/// Production requires an explicit, non-blank secret. Development falls
/// back to a fixed non-secret value with a warning on stderr (logging is
/// not initialized yet when configuration loads).
#[allow(clippy::print_stderr)]
fn resolve_secret(
    raw: Option<String>,
    environment: Environment,
) -> Result<SigningSecret, ConfigError> {
    match raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty()) {
        Some(secret) => Ok(SigningSecret::new(secret)),
        None => match environment {
            Environment::Production => Err(ConfigError::MissingSecret),
            Environment::Development => {
                eprintln!(
                    "WARNING: DLGATE_SECRET is not set; using the development fallback secret. \
                     Grants signed with it are forgeable by anyone with the source."
                );
                Ok(SigningSecret::new(DEV_FALLBACK_SECRET))
            }
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn production_without_secret_refuses_to_start() {
        let result = resolve_secret(None, Environment::Production);
        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn production_with_blank_secret_refuses_to_start() {
        let result = resolve_secret(Some("   ".to_owned()), Environment::Production);
        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn development_without_secret_uses_fallback() {
        let secret = resolve_secret(None, Environment::Development).unwrap();
        assert_eq!(secret.expose(), DEV_FALLBACK_SECRET);
    }

    #[test]
    fn explicit_secret_is_used_verbatim() {
        let secret = resolve_secret(Some("s3cret".to_owned()), Environment::Production).unwrap();
        assert_eq!(secret.expose(), "s3cret");
    }
}
