//! Application registration handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{not_found, unauthorized, ApiKeyQuery, SharedState};

/// Body of an application registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationBody {
    pub application_short_name: String,
    pub application_name: Option<String>,
    pub application_tag: Option<String>,
    pub description: Option<String>,
}

/// GET /registration/v2/{account}/applications
pub async fn list_applications(
    State(state): State<SharedState>,
    Path(account_id): Path<String>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    let applications: Vec<_> = state.applications.values().cloned().collect();
    Json(serde_json::json!({
        "application": applications,
        "resourceURL": format!("{}/registration/v2/{account_id}/applications", state.base_url),
    }))
    .into_response()
}

/// GET /registration/v2/{account}/applications/{id}
pub async fn get_application(
    State(state): State<SharedState>,
    Path((account_id, app_id)): Path<(String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    match state.applications.get(&app_id) {
        Some(app) => Json(app.clone()).into_response(),
        None => not_found("SE0010(Application does not exist!)"),
    }
}

/// POST /registration/v2/{account}/applications
pub async fn create_application(
    State(state): State<SharedState>,
    Path(account_id): Path<String>,
    Query(query): Query<ApiKeyQuery>,
    Json(body): Json<CreateApplicationBody>,
) -> Response {
    let mut state = state.write().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    let duplicate = state
        .applications
        .values()
        .any(|a| a.application_short_name == body.application_short_name);
    if duplicate {
        return (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "error": format!("application {} already exists", body.application_short_name)
            })),
        )
            .into_response();
    }

    let app = state.insert_application(
        &body.application_short_name,
        body.application_name,
        body.application_tag,
        body.description,
    );
    (StatusCode::CREATED, Json(app)).into_response()
}

/// DELETE /registration/v2/{account}/applications/{id}
pub async fn delete_application(
    State(state): State<SharedState>,
    Path((account_id, app_id)): Path<(String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let mut state = state.write().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    match state.applications.remove(&app_id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found("SE0010(Application does not exist!)"),
    }
}
