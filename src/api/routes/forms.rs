//! Form Routes
//!
//! Storing forms and matching them by key/value.
//!
//! - GET /api/query - Store the query parameters as a form (login required)
//! - GET /api/forms - Names of forms matching the query parameters (JSON)
//! - POST /api/forms - Store an urlencoded body as a form (JSON)
//! - GET /forms - Matching forms as an HTML list
//! - POST /forms - Store an urlencoded body as a form (HTML)
//! - GET /forms/:name - The stored form file

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Html,
    Form, Json,
};
use std::sync::Arc;

use crate::api::dto::StoredResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::pages;
use crate::api::state::AppState;
use crate::index::{FieldSet, FormId, FormQuery};

type Params = Vec<(String, String)>;

/// GET /api/query
pub async fn store_query(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<Params>,
) -> ApiResult<Json<StoredResponse>> {
    if state.current_user(&headers).is_none() {
        return Err(ApiError::Unauthorized("please log in".to_string()));
    }
    if params.is_empty() {
        return Err(ApiError::Validation("no query parameters supplied".to_string()));
    }

    let id = store_form(&state, params).await?;

    Ok(Json(StoredResponse {
        status: "stored".to_string(),
        file: id.name(),
    }))
}

/// GET /api/forms
pub async fn find_forms(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
) -> Json<Vec<String>> {
    Json(matching_names(&state, params))
}

/// POST /api/forms
pub async fn submit_form_json(
    State(state): State<Arc<AppState>>,
    Form(params): Form<Params>,
) -> ApiResult<(StatusCode, Json<StoredResponse>)> {
    if params.is_empty() {
        return Err(ApiError::Validation("empty form".to_string()));
    }

    let id = store_form(&state, params).await?;

    Ok((
        StatusCode::CREATED,
        Json(StoredResponse {
            status: "stored".to_string(),
            file: id.name(),
        }),
    ))
}

/// GET /forms
pub async fn list_forms(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Params>,
) -> Html<String> {
    Html(pages::forms_page(&matching_names(&state, params)))
}

/// POST /forms
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(params): Form<Params>,
) -> ApiResult<Html<String>> {
    if params.is_empty() {
        return Err(ApiError::Validation("empty form".to_string()));
    }

    let id = store_form(&state, params).await?;
    Ok(Html(pages::stored_page(&id.name())))
}

/// GET /forms/:name
pub async fn serve_form(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Html<String>> {
    let content = state.files.read(&name).await?;
    Ok(Html(content))
}

/// Index the submission, then write its file outside the index lock
async fn store_form(state: &AppState, params: Params) -> ApiResult<FormId> {
    let fields: FieldSet = params.into_iter().collect();

    let id = state.index.append(fields.clone())?;
    state.files.write(id, &fields).await?;

    tracing::info!(
        form = %id,
        fields = fields.len(),
        values = fields.value_count(),
        "Stored form"
    );
    Ok(id)
}

fn matching_names(state: &AppState, params: Params) -> Vec<String> {
    let query = FormQuery::from_pairs(params);
    let names: Vec<String> = state.index.find(&query).iter().map(FormId::name).collect();

    tracing::debug!(terms = query.len(), matches = names.len(), "Matched forms");
    names
}
