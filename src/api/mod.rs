//! Formdeck HTTP API
//!
//! HTTP layer for Formdeck, built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Redirect to `/app`
//! - `GET|POST /login`, `GET|POST /register`, `GET|POST /logout`
//! - `GET /app` - Main UI (`?bypass=1` for guests)
//!
//! ## Forms
//! - `GET /forms` - Matching forms as HTML
//! - `POST /forms` - Store a form (HTML response)
//! - `GET /forms/:name` - A stored form file
//! - `GET /api/forms` - Matching form names (JSON)
//! - `POST /api/forms` - Store a form (JSON response)
//! - `GET /api/query` - Store the query parameters (login required)
//!
//! ## Context and templates
//! - `POST /api/saveContext` - Save the encrypted UI context
//! - `POST /import` - Import an HTML template
//! - `GET /templates/manifest.json`, `GET /templates/:name`
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use formdeck::api::{serve, ApiConfig, AppState};
//! use formdeck::index::FormIndex;
//! use formdeck::storage::{FormFileStore, TemplateLibrary};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files = FormFileStore::new("./forms").await?;
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(
//!         Arc::new(FormIndex::new()),
//!         files,
//!         Arc::new(TemplateLibrary::new()),
//!         config.clone(),
//!     );
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cookies;
pub mod dto;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;

    let api_routes = Router::new()
        .route("/saveContext", post(routes::app::save_context))
        .route("/query", get(routes::forms::store_query))
        .route(
            "/forms",
            get(routes::forms::find_forms).post(routes::forms::submit_form_json),
        );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::app::root_redirect))
        // Account pages
        .route(
            "/login",
            get(routes::auth::login_page).post(routes::auth::login),
        )
        .route(
            "/register",
            get(routes::auth::register_page).post(routes::auth::register),
        )
        .route(
            "/logout",
            get(routes::auth::logout).post(routes::auth::logout),
        )
        .route("/app", get(routes::app::app))
        // Stored forms
        .route(
            "/forms",
            get(routes::forms::list_forms).post(routes::forms::submit_form),
        )
        .route("/forms/:name", get(routes::forms::serve_form))
        // Templates - uploads get their own body limit
        .route(
            "/import",
            post(routes::templates::import_template).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/templates/:name", get(routes::templates::template_file))
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the HTTP server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Formdeck listening on http://{}/app", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Formdeck shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
