//! SMS messaging handlers: subscriptions and outbound requests.
//!
//! Outbound endpoints authenticate with the application's own key.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Map;

use super::{not_found, unauthorized, ApiKeyQuery, SharedState};
use crate::{CallbackReference, OutboundSms, OutboundSubscription};

/// Body of an outbound subscription request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutboundSubscriptionBody {
    pub callback_reference: Option<CallbackReference>,
    pub filter_criteria: Option<String>,
    #[serde(default)]
    pub destination_address: Vec<String>,
}

/// GET /smsmessaging/v2/{account}/inbound/subscriptions
pub async fn list_inbound_subscriptions(
    State(state): State<SharedState>,
    Path(account_id): Path<String>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    Json(serde_json::json!({
        "subscription": state.inbound_subscriptions,
        "resourceURL": format!(
            "{}/smsmessaging/v2/{account_id}/inbound/subscriptions/",
            state.base_url
        ),
    }))
    .into_response()
}

/// GET /smsmessaging/v2/{account}/outbound/{app}/subscriptions
///
/// The `deliveryReceiptSubscription` key is omitted when the application
/// has none.
pub async fn list_outbound_subscriptions(
    State(state): State<SharedState>,
    Path((account_id, app)): Path<(String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if !state.is_application(&account_id, &app, query.api_key.as_deref()) {
        return unauthorized();
    }

    let mut body = serde_json::json!({
        "resourceURL": format!(
            "{}/smsmessaging/v2/{account_id}/outbound/{app}/subscriptions",
            state.base_url
        ),
    });
    let subscriptions = state.outbound_subscriptions_for(&app);
    if !subscriptions.is_empty() {
        body["deliveryReceiptSubscription"] = serde_json::json!(subscriptions);
    }
    Json(body).into_response()
}

/// GET /smsmessaging/v2/{account}/outbound/{app}/subscriptions/{id}
pub async fn get_outbound_subscription(
    State(state): State<SharedState>,
    Path((account_id, app, subscription_id)): Path<(String, String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if !state.is_application(&account_id, &app, query.api_key.as_deref()) {
        return unauthorized();
    }

    match state.outbound_subscriptions.get(&subscription_id) {
        Some((owner, subscription)) if *owner == app => Json(subscription.clone()).into_response(),
        _ => not_found("SE0010(Subscription does not exist!)"),
    }
}

/// POST /smsmessaging/v2/{account}/outbound/{app}/subscriptions
pub async fn create_outbound_subscription(
    State(state): State<SharedState>,
    Path((account_id, app)): Path<(String, String)>,
    Query(query): Query<ApiKeyQuery>,
    Json(body): Json<CreateOutboundSubscriptionBody>,
) -> Response {
    let mut state = state.write().await;
    if !state.is_application(&account_id, &app, query.api_key.as_deref()) {
        return unauthorized();
    }

    let subscription = OutboundSubscription {
        callback_reference: body.callback_reference,
        filter_criteria: body.filter_criteria,
        destination_address: body.destination_address,
        resource_url: String::new(),
        extra: Map::new(),
    };
    let created = state.insert_outbound_subscription(&app, subscription);
    (StatusCode::CREATED, Json(created)).into_response()
}

/// DELETE /smsmessaging/v2/{account}/outbound/{app}/subscriptions/{id}
pub async fn delete_outbound_subscription(
    State(state): State<SharedState>,
    Path((account_id, app, subscription_id)): Path<(String, String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let mut state = state.write().await;
    if !state.is_application(&account_id, &app, query.api_key.as_deref()) {
        return unauthorized();
    }

    let owned = matches!(
        state.outbound_subscriptions.get(&subscription_id),
        Some((owner, _)) if *owner == app
    );
    if !owned {
        return not_found("SE0010(Subscription does not exist!)");
    }
    state.outbound_subscriptions.remove(&subscription_id);
    StatusCode::NO_CONTENT.into_response()
}

/// POST /smsmessaging/v2/{account}/outbound/{app}/requests
///
/// Accepted messages produce a delivery receipt on the application's
/// subscription channel.
pub async fn send_sms(
    State(state): State<SharedState>,
    Path((account_id, app)): Path<(String, String)>,
    Query(query): Query<ApiKeyQuery>,
    Json(mut request): Json<OutboundSms>,
) -> Response {
    let mut state = state.write().await;
    if !state.is_application(&account_id, &app, query.api_key.as_deref()) {
        return unauthorized();
    }

    let Some(imsi) = request.address.first().cloned() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "address is required"})),
        )
            .into_response();
    };
    let deliverable = state
        .find_device("IMSI", &imsi)
        .is_some_and(|device| device.sms_capable);
    if !deliverable {
        return not_found("SE0010(Device does not exist!)");
    }

    let request_id = state.next_id();
    request.resource_url = Some(format!(
        "{}/smsmessaging/v2/{account_id}/outbound/{app}/requests/{request_id}",
        state.base_url
    ));
    state.queue_delivery_receipt(&app, &imsi);

    (StatusCode::CREATED, Json(request)).into_response()
}
