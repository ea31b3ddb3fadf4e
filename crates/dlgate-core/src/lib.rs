//! Core library for `dlgate`.
//!
//! Contains the download grant issuer/verifier, the shared keyed-hash
//! routine, the CSRF token issuer, lead/quote form validation, and
//! notification mail composition. This crate knows nothing about HTTP;
//! the server crate wires these pieces to Axum.

pub mod clock;
pub mod csrf;
pub mod error;
pub mod grant;
pub mod mail;
pub mod secret;
pub mod sign;
pub mod validate;
