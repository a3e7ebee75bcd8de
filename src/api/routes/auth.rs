//! Account Routes
//!
//! - GET /login - Login page (keeps the original query for after login)
//! - POST /login - Verify credentials and start a session
//! - GET /register - Registration page
//! - POST /register - Create an account and log in
//! - GET|POST /logout - End the session

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use std::sync::Arc;

use crate::api::cookies;
use crate::api::dto::{LoginForm, RegisterForm};
use crate::api::pages::{self, AppPage};
use crate::api::state::AppState;

/// GET /login
pub async fn login_page(RawQuery(raw): RawQuery) -> Html<String> {
    Html(pages::login_page("", raw.as_deref().unwrap_or_default()))
}

/// POST /login
///
/// Bad credentials re-render the form; success answers 303 to `/app`,
/// carrying the preserved query string when it is safe to.
pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    if !state.users.verify(&form.username, &form.password) {
        tracing::info!(user = %form.username, "Failed login");
        return Html(pages::login_page("Invalid credentials", &form.redirect)).into_response();
    }

    let sid = state.sessions.create(Some(form.username.clone()));
    tracing::info!(user = %form.username, "User logged in");

    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, app_location(&form.redirect))],
        [(
            header::SET_COOKIE,
            cookies::session_cookie(&sid, state.config.session_ttl_secs),
        )],
    )
        .into_response()
}

/// `/app` carrying the preserved query string.
///
/// The query arrives decoded from the login form, so anything that is not a
/// plain URI query (whitespace, control bytes, a fragment) falls back to `/app`.
fn app_location(redirect: &str) -> HeaderValue {
    let plain = !redirect.is_empty()
        && redirect.bytes().all(|b| b.is_ascii_graphic() && b != b'#');
    if plain {
        if let Ok(location) = HeaderValue::try_from(format!("/app?{}", redirect)) {
            return location;
        }
    }
    HeaderValue::from_static("/app")
}

/// GET /register
pub async fn register_page() -> Html<String> {
    Html(pages::register_page(""))
}

/// POST /register
///
/// Creates the user, logs them in and renders the app without a saved context.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if let Err(e) = state.users.register(&form.username, &form.password) {
        return Html(pages::register_page(&e.to_string())).into_response();
    }

    let sid = state.sessions.create(Some(form.username.clone()));
    let salt = state.users.salt_b64(&form.username).unwrap_or_default();

    let page = pages::app_page(&AppPage {
        username: &form.username,
        salt_b64: &salt,
        enc_ctx_b64: "",
        bypass: false,
    });

    (
        [(
            header::SET_COOKIE,
            cookies::session_cookie(&sid, state.config.session_ttl_secs),
        )],
        Html(page),
    )
        .into_response()
}

/// GET|POST /logout
pub async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match cookies::session_id(&headers) {
        Some(sid) => {
            state.sessions.remove(&sid);
            (
                [(header::SET_COOKIE, cookies::expired_cookie())],
                Redirect::to("/login"),
            )
                .into_response()
        }
        None => Redirect::to("/login").into_response(),
    }
}
