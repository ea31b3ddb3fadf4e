//! Lead capture: `POST /api/leads`.
//!
//! Checks the CSRF double-submit pair, validates the form, composes the
//! notification mail, and issues a `brochure` grant as the
//! `svs_dl_brochure` cookie. The grant is the only authorization the
//! subsequent brochure download needs.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use dlgate_core::mail;
use dlgate_core::validate::LeadForm;

use crate::cookies;
use crate::error::AppError;
use crate::gate::{BROCHURE_CLASS, BROCHURE_COOKIE};
use crate::routes::csrf::CSRF_COOKIE;
use crate::state::AppState;

/// Build the leads router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/leads", post(submit))
}

/// Request body for `POST /api/leads`.
#[derive(Debug, Deserialize)]
pub struct LeadRequest {
    #[serde(flatten)]
    pub form: LeadForm,
    /// Echo of the token from the `svs_csrf` cookie.
    pub csrf_token: String,
}

/// Handle a lead submission and grant brochure access.
async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<LeadRequest>,
) -> Result<Response, AppError> {
    let csrf_cookie = cookies::value(&headers, CSRF_COOKIE);
    if !state
        .csrf
        .accept(csrf_cookie.as_deref(), Some(&body.csrf_token))
    {
        return Err(AppError::Forbidden);
    }

    body.form.validate()?;

    let notification = mail::lead_notification(&state.lead_inbox, &body.form);
    info!(to = %notification.to, subject = %notification.subject, "lead notification composed");

    let grant = state.grants.issue(BROCHURE_CLASS, state.grant_ttl_secs);
    let cookie = cookies::set_cookie(
        BROCHURE_COOKIE,
        &grant,
        state.grant_ttl_secs,
        state.secure_cookies,
    );

    let mut response = Json(serde_json::json!({"status": "ok"})).into_response();
    cookies::attach(&mut response, &cookie)?;
    Ok(response)
}
