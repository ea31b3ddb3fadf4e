//! HTTP route handlers for `dlgate`.
//!
//! Routes are organized by concern:
//! - `sys`: health check
//! - `csrf`: CSRF token issuer
//! - `leads`: brochure lead capture → brochure grant
//! - `quotes`: quote request capture → quotes grant
//!
//! Gated asset serving is wired in the router assembly, not here; the
//! static file service carries no handler logic of its own.

pub mod csrf;
pub mod leads;
pub mod quotes;
pub mod sys;
