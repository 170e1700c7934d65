//! HTTP request handlers for the mock server.

pub mod applications;
pub mod channels;
pub mod devices;
pub mod subscriptions;

pub use applications::*;
pub use channels::*;
pub use devices::*;
pub use subscriptions::*;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

pub(crate) type SharedState = Arc<RwLock<MockState>>;

/// The `apiKey` query parameter every endpoint authenticates with.
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeyQuery {
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

/// 401 with an empty body, as AerFrame answers bad keys.
pub(crate) fn unauthorized() -> Response {
    StatusCode::UNAUTHORIZED.into_response()
}

/// 404 in the AerFrame service-exception shape.
pub(crate) fn not_found(text: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "link": [],
            "serviceException": {
                "messageId": "SVC0002",
                "text": "Invalid input value for message part {0}",
                "variables": [text]
            },
            "policyException": null
        })),
    )
        .into_response()
}
