//! AerAdmin, network services and AerTraffic handlers, plus the anonymous
//! endpoints `ping` checks.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use super::{not_found, unauthorized, ApiKeyQuery, SharedState};
use crate::mock_server::state::{MockDevice, MockState};

/// Result code AerAdmin reports for an unknown device.
pub const DEVICE_NOT_FOUND: i64 = 1047;

const ID_TYPES: [&str; 3] = ["ICCID", "IMSI", "MSISDN"];

fn device_identifiers(device: &MockDevice) -> Value {
    json!({
        "iccId": device.iccid,
        "imsi": device.imsi,
        "msisdn": device.msisdn,
    })
}

fn result(code: i64, message: &str) -> Value {
    json!({"resultCode": code, "resultMessage": message})
}

/// Find the device named by the first `ICCID`/`IMSI`/`MSISDN` field present.
fn lookup<'a>(state: &'a MockState, fields: &HashMap<String, String>) -> Option<&'a MockDevice> {
    ID_TYPES.iter().find_map(|id_type| {
        fields
            .get(*id_type)
            .and_then(|value| state.find_device(id_type, value))
    })
}

/// POST /AerAdmin_WS_5_0/rest/devices/details
pub async fn device_details(
    State(state): State<SharedState>,
    Query(query): Query<ApiKeyQuery>,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    let state = state.read().await;
    let account_id = body.get("accountID").and_then(Value::as_str).unwrap_or_default();
    if !state.is_account(account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    let fields: HashMap<String, String> = body
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
        .collect();

    let Some(device) = lookup(&state, &fields) else {
        return Json(result(DEVICE_NOT_FOUND, "Device not found.")).into_response();
    };

    let mut response = result(0, "OK");
    response["transactionID"] = json!(format!("mock-{}", device.iccid));
    response["deviceProfileId"] = json!(format!("AER{}", device.msisdn));
    response["deviceAttributes"] = json!([{
        "result": result(0, "OK"),
        "deviceID": device_identifiers(device),
        "deviceStatus": device.status,
        "technology": "LTE",
        "ratePlan": "MOCK-PLAN",
    }]);
    Json(response).into_response()
}

/// GET /AerAdmin_WS_5_0/rest/devices/network/details
pub async fn device_network_details(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let state = state.read().await;
    let account_id = params.get("accountID").map(String::as_str).unwrap_or_default();
    if !state.is_account(account_id, params.get("apiKey").map(String::as_str)) {
        return unauthorized();
    }

    let Some(device) = lookup(&state, &params) else {
        return Json(result(DEVICE_NOT_FOUND, "Device not found.")).into_response();
    };

    let mut response = result(0, "OK");
    response["networkResponse"] = json!([{
        "deviceID": device_identifiers(device),
        "registration": {"isRegistered": true},
        "dataSession": {"isActive": false},
    }]);
    Json(response).into_response()
}

/// GET /networkservices/v2/{account}/devices/{type}/{id}/networkLocation
pub async fn network_location(
    State(state): State<SharedState>,
    Path((account_id, id_type, id)): Path<(String, String, String)>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if account_id != state.account_id || !state.is_known_key(query.api_key.as_deref()) {
        return unauthorized();
    }
    if state.find_device(&id_type, &id).is_none() {
        return not_found("SE0010(Device does not exist!)");
    }

    Json(json!({
        "responseType": "Cell ID",
        "mcc": 310,
        "mnc": 170,
        "lac": 1234,
        "cellId": 5678,
        "locationTimestamp": 0.0,
        "ageOfLocation": 0,
    }))
    .into_response()
}

/// GET /v1/{account}/systemReports/deviceSummary
pub async fn device_summary_report(
    State(state): State<SharedState>,
    Path(account_id): Path<String>,
    Query(query): Query<ApiKeyQuery>,
) -> Response {
    let state = state.read().await;
    if !state.is_account(&account_id, query.api_key.as_deref()) {
        return unauthorized();
    }

    Json(json!({
        "accountId": account_id,
        "durationInMonths": 3,
        "totalDevices": state.devices.len(),
    }))
    .into_response()
}

/// GET /AerAdmin_WS_5_0/rest/ without parameters fails the way the real
/// service does.
pub async fn aeradmin_root() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "missing parameters").into_response()
}

/// GET / (AerTraffic base).
pub async fn aertraffic_root() -> &'static str {
    "AerTraffic"
}

/// GET /longpoll (AerFrame long-poll base) refuses anonymous access.
pub async fn longpoll_root() -> Response {
    StatusCode::FORBIDDEN.into_response()
}
