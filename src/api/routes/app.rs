//! App Routes
//!
//! - GET / - Redirect to the app
//! - GET /app - Main UI (login required unless `bypass=1`)
//! - POST /api/saveContext - Store the client-encrypted UI context

use axum::{
    body::Bytes,
    extract::{Query, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use crate::api::cookies;
use crate::api::dto::{AppParams, SaveContextRequest};
use crate::api::error::{ApiError, ApiResult};
use crate::api::pages::{self, AppPage};
use crate::api::state::AppState;

/// GET /
pub async fn root_redirect() -> Redirect {
    Redirect::temporary("/app")
}

/// GET /app
///
/// Anonymous requests go to `/login` with their query string intact.
/// With `bypass=1` a guest session is started instead.
pub async fn app(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<AppParams>,
    RawQuery(raw): RawQuery,
) -> Response {
    let session = state.current_session(&headers);
    let username = session
        .as_ref()
        .and_then(|(_, s)| s.username.clone())
        .unwrap_or_default();
    let bypass = params.bypass.as_deref() == Some("1");

    if username.is_empty() && !bypass {
        let mut login = "/login".to_string();
        if let Some(raw) = raw.filter(|r| !r.is_empty()) {
            login.push('?');
            login.push_str(&raw);
        }
        return Redirect::to(&login).into_response();
    }

    let (salt, enc) = if username.is_empty() {
        (String::new(), String::new())
    } else {
        (
            state.users.salt_b64(&username).unwrap_or_default(),
            state.users.context(&username).unwrap_or_default(),
        )
    };

    let page = Html(pages::app_page(&AppPage {
        username: &username,
        salt_b64: &salt,
        enc_ctx_b64: &enc,
        bypass,
    }));

    if session.is_none() {
        let sid = state.sessions.create(None);
        tracing::debug!(sid = %sid, "Started guest session");
        return (
            [(
                header::SET_COOKIE,
                cookies::session_cookie(&sid, state.config.session_ttl_secs),
            )],
            page,
        )
            .into_response();
    }

    page.into_response()
}

/// POST /api/saveContext
///
/// Guests cannot persist a context; their saves are acknowledged and dropped
/// before the body is looked at.
pub async fn save_context(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<StatusCode> {
    let Some(username) = state.current_user(&headers) else {
        return Ok(StatusCode::OK);
    };

    let req: SaveContextRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Validation(format!("invalid context body: {}", e)))?;

    state.users.save_context(&username, req.enc)?;
    Ok(StatusCode::OK)
}
