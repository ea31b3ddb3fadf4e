//! Quote request capture: `POST /api/quotes`.
//!
//! Same flow as lead capture, issuing a `quotes` grant as the
//! `svs_dl_quotes` cookie.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use dlgate_core::mail;
use dlgate_core::validate::QuoteForm;

use crate::cookies;
use crate::error::AppError;
use crate::gate::{QUOTES_CLASS, QUOTES_COOKIE};
use crate::routes::csrf::CSRF_COOKIE;
use crate::state::AppState;

/// Build the quotes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quotes", post(submit))
}

/// Request body for `POST /api/quotes`.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(flatten)]
    pub form: QuoteForm,
    /// Echo of the token from the `svs_csrf` cookie.
    pub csrf_token: String,
}

/// Handle a quote request and grant quote-document access.
async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<QuoteRequest>,
) -> Result<Response, AppError> {
    let csrf_cookie = cookies::value(&headers, CSRF_COOKIE);
    if !state
        .csrf
        .accept(csrf_cookie.as_deref(), Some(&body.csrf_token))
    {
        return Err(AppError::Forbidden);
    }

    body.form.validate()?;

    let notification = mail::quote_notification(&state.lead_inbox, &body.form);
    info!(to = %notification.to, subject = %notification.subject, "quote notification composed");

    let grant = state.grants.issue(QUOTES_CLASS, state.grant_ttl_secs);
    let cookie = cookies::set_cookie(
        QUOTES_COOKIE,
        &grant,
        state.grant_ttl_secs,
        state.secure_cookies,
    );

    let mut response = Json(serde_json::json!({"status": "ok"})).into_response();
    cookies::attach(&mut response, &cookie)?;
    Ok(response)
}
