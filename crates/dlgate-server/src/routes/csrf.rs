//! CSRF token issuer: `GET /api/csrf`.
//!
//! Mints a signed, expiring token, sets it as the double-submit cookie,
//! and returns the same token in the JSON body for the form to echo.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::cookies;
use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the CSRF token.
pub const CSRF_COOKIE: &str = "svs_csrf";

/// Build the CSRF router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/csrf", get(issue))
}

/// Response body for `GET /api/csrf`.
#[derive(Debug, Serialize)]
struct CsrfResponse {
    /// Token to echo in the form submission.
    token: String,
}

/// Mint a CSRF token and set it as the double-submit cookie.
async fn issue(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let token = state.csrf.issue(state.csrf_ttl_secs);
    let cookie = cookies::set_cookie(CSRF_COOKIE, &token, state.csrf_ttl_secs, state.secure_cookies);

    let mut response = Json(CsrfResponse { token }).into_response();
    cookies::attach(&mut response, &cookie)?;
    Ok(response)
}
