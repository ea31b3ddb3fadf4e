//! Error types for `dlgate-core`.
//!
//! Grant and CSRF verification deliberately return booleans, not errors:
//! collapsing malformed, expired, and forged values into a single `false`
//! denies an attacker an oracle for why a forgery failed. Only form
//! validation, which faces the legitimate user, reports what was wrong.

/// Errors from lead/quote form validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("field '{field}' is required")]
    Missing { field: &'static str },

    /// A field exceeds its length bound.
    #[error("field '{field}' is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },

    /// The email address failed sanity checks.
    #[error("email address is invalid")]
    InvalidEmail,

    /// The phone number failed sanity checks.
    #[error("phone number is invalid")]
    InvalidPhone,
}
