//! Template Routes
//!
//! - POST /import - Import an HTML template (multipart field `formfile`)
//! - GET /templates/manifest.json - Names of imported templates
//! - GET /templates/:name - Raw `<template>` markup

use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::api::dto::StatusResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

const UPLOAD_FIELD: &str = "formfile";
const MANIFEST: &str = "manifest.json";

/// POST /import
pub async fn import_template(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<StatusResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("cannot parse multipart form: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::Validation("missing file name".to_string()))?;

        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(format!("cannot read uploaded file: {}", e)))?;

        let html = std::str::from_utf8(&content).map_err(|e| {
            ApiError::Validation(format!("template '{}' is not valid UTF-8: {}", filename, e))
        })?;

        state
            .templates
            .import(&filename, html)
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        return Ok(Json(StatusResponse {
            status: "ok".to_string(),
        }));
    }

    Err(ApiError::Validation(format!("missing {}", UPLOAD_FIELD)))
}

/// GET /templates/:name
///
/// `manifest.json` lists the imported names; anything else is one template.
pub async fn template_file(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Response> {
    if name == MANIFEST {
        return Ok(Json(state.templates.manifest()).into_response());
    }

    state
        .templates
        .get(&name)
        .map(|markup| Html(markup).into_response())
        .ok_or(ApiError::NotFound(format!("template '{}'", name)))
}
