//! Notification channel and long-poll handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::{not_found, unauthorized, ApiKeyQuery, SharedState};

/// Body of a channel creation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChannelBody {
    pub application_tag: String,
    pub channel_type: Option<String>,
}

/// GET /notificationchannel/v2/{account}/channels
pub async fn list_channels(
    State(state): State<SharedState>,
    Path(account_id): Path<String>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    let channels: Vec<_> = state.channels.values().cloned().collect();
    Json(serde_json::json!({
        "notificationChannel": channels,
        "resourceURL": format!("{}/notificationchannel/v2/{account_id}/channels", state.base_url),
    }))
    .into_response()
}

/// GET /notificationchannel/v2/{account}/channels/{id}
pub async fn get_channel(
    State(state): State<SharedState>,
    Path((account_id, channel_id)): Path<(String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    match state.channels.get(&channel_id) {
        Some(channel) => Json(channel.clone()).into_response(),
        None => not_found("SE0010(Channel does not exist!)"),
    }
}

/// POST /notificationchannel/v2/{account}/channels
///
/// Answers 200, not 201, like the real service.
pub async fn create_channel(
    State(state): State<SharedState>,
    Path(account_id): Path<String>,
    Query(query): Query<ApiKeyQuery>,
    Json(body): Json<CreateChannelBody>,
) -> Response {
    let mut state = state.write().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }
    if body.channel_type.as_deref() != Some("LongPolling") {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "only LongPolling channels are supported"})),
        )
            .into_response();
    }

    let channel = state.insert_channel(&body.application_tag);
    Json(channel).into_response()
}

/// DELETE /notificationchannel/v2/{account}/channels/{id}
pub async fn delete_channel(
    State(state): State<SharedState>,
    Path((account_id, channel_id)): Path<(String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let mut state = state.write().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    match state.channels.remove(&channel_id) {
        Some(_) => {
            state.pending.remove(&channel_id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("SE0010(Channel does not exist!)"),
    }
}

/// GET /notificationchannel/v2/{account}/longpoll/{id}
///
/// Returns immediately with whatever is queued; an empty queue yields empty
/// arrays.
pub async fn long_poll(
    State(state): State<SharedState>,
    Path((account_id, channel_id)): Path<(String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let mut state = state.write().await;
    if account_id != state.account_id || !state.is_known_key(query.api_key.as_deref()) {
        return (
            StatusCode::UNAUTHORIZED,
            "Access Denied: No account associated with the given Api Key!",
        )
            .into_response();
    }
    if !state.channels.contains_key(&channel_id) {
        return not_found("SE0010(Channel does not exist!)");
    }

    Json(state.drain_channel(&channel_id)).into_response()
}
