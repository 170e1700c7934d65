//! Mobile-terminated SMS through AerFrame.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::account::AppScope;
use crate::client::AerisClient;
use crate::error::Result;

/// Correlator sent with every outbound request.
pub const CLIENT_CORRELATOR: &str = "123456";

/// An outbound SMS request, as sent and as echoed back by AerFrame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundSms {
    /// Destination IMSIs.
    #[serde(default)]
    pub address: Vec<String>,

    pub sender_address: String,

    #[serde(rename = "outboundSMSTextMessage")]
    pub outbound_sms_text_message: SmsText,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_correlator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_info_list: Option<Value>,

    #[serde(rename = "resourceURL", default, skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsText {
    pub message: String,
}

impl OutboundSms {
    /// Request body for one SMS from `app_short_name` to `imsi`.
    pub fn new(app_short_name: &str, imsi: &str, text: &str) -> Self {
        Self {
            address: vec![imsi.to_string()],
            sender_address: app_short_name.to_string(),
            outbound_sms_text_message: SmsText {
                message: text.to_string(),
            },
            client_correlator: Some(CLIENT_CORRELATOR.to_string()),
            sender_name: Some(app_short_name.to_string()),
            delivery_info_list: None,
            resource_url: None,
            extra: Map::new(),
        }
    }
}

/// Send an SMS to a device from an application.
///
/// The scope's API key must be the application's key. Returns `None` when
/// AerFrame answers 404, meaning the IMSI is unknown or the device cannot
/// receive SMS.
///
/// # Errors
///
/// Any status other than 201 or 404.
#[tracing::instrument(skip(client, scope, text), fields(app = %scope.app_short_name))]
pub async fn send_mt_sms(
    client: &AerisClient,
    scope: &AppScope,
    imsi: &str,
    text: &str,
) -> Result<Option<OutboundSms>> {
    let body = OutboundSms::new(&scope.app_short_name, imsi, text);
    let url = client
        .endpoints()
        .outbound_requests(&scope.account.id, &scope.app_short_name);

    let response = client.post(&url, &scope.account.api_key, &body).await?;
    if response.status() == 404 {
        tracing::warn!(
            body = response.body(),
            "IMSI is not found or does not support SMS."
        );
        return Ok(None);
    }
    let sent: OutboundSms = response.expect_json(201)?;
    tracing::info!("Sent SMS to {imsi}");
    Ok(Some(sent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body() {
        let body = OutboundSms::new("app", "310170000000001", "hello");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "address": ["310170000000001"],
                "senderAddress": "app",
                "outboundSMSTextMessage": {"message": "hello"},
                "clientCorrelator": "123456",
                "senderName": "app"
            })
        );
    }
}
