//! AerAdmin device administration.
//!
//! Both AerAdmin calls answer HTTP 200 for business-level failures too, so
//! success additionally requires an in-body `resultCode` of 0.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::account::Account;
use crate::client::AerisClient;
use crate::error::Result;

/// Kinds of device identifier AerAdmin accepts.
///
/// The wire name (upper case) doubles as the JSON key or query parameter
/// carrying the identifier value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceIdType {
    Iccid,
    Imsi,
    Msisdn,
    Mdn,
    Esn,
    Meid,
}

impl DeviceIdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceIdType::Iccid => "ICCID",
            DeviceIdType::Imsi => "IMSI",
            DeviceIdType::Msisdn => "MSISDN",
            DeviceIdType::Mdn => "MDN",
            DeviceIdType::Esn => "ESN",
            DeviceIdType::Meid => "MEID",
        }
    }
}

impl fmt::Display for DeviceIdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceIdType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ICCID" => Ok(DeviceIdType::Iccid),
            "IMSI" => Ok(DeviceIdType::Imsi),
            "MSISDN" => Ok(DeviceIdType::Msisdn),
            "MDN" => Ok(DeviceIdType::Mdn),
            "ESN" => Ok(DeviceIdType::Esn),
            "MEID" => Ok(DeviceIdType::Meid),
            other => Err(format!(
                "unknown device ID type '{other}' (expected ICCID, IMSI, MSISDN, MDN, ESN or MEID)"
            )),
        }
    }
}

/// A device identifier and its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceId {
    pub id_type: DeviceIdType,
    pub value: String,
}

impl DeviceId {
    pub fn new(id_type: DeviceIdType, value: impl Into<String>) -> Self {
        Self {
            id_type,
            value: value.into(),
        }
    }
}

/// Result of `devices/details`.
///
/// Fields not modelled here are kept in `extra`, so serializing the value
/// reproduces the body the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_message: Option<String>,

    #[serde(rename = "transactionID", default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_profile_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_attributes: Vec<DeviceAttributes>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-device attributes inside [`DeviceDetails`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAttributes {
    #[serde(rename = "deviceID", default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceIdentifiers>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_plan: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The identifiers AerAdmin knows a device by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceIdentifiers {
    #[serde(rename = "iccId", default, skip_serializing_if = "Option::is_none")]
    pub iccid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imsi: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msisdn: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeviceDetails {
    /// Identifiers of the first (normally only) device in the response.
    pub fn identifiers(&self) -> Option<&DeviceIdentifiers> {
        self.device_attributes
            .first()
            .and_then(|attrs| attrs.device_id.as_ref())
    }
}

/// Result of `devices/network/details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_code: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_message: Option<String>,

    /// One entry per network record, kept as the vendor sent it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_response: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NetworkDetails {
    /// Whether the first network record reports the device as registered.
    pub fn is_registered(&self) -> Option<bool> {
        self.network_response
            .first()
            .and_then(|r| r.get("registration"))
            .and_then(|r| r.get("isRegistered"))
            .and_then(Value::as_bool)
    }
}

/// Body of the `devices/details` request.
#[derive(Serialize)]
struct DeviceQuery<'a> {
    #[serde(rename = "accountID")]
    account_id: &'a str,
    email: &'a str,
    #[serde(flatten)]
    device: Map<String, Value>,
}

/// Fetch a device's details.
///
/// POSTs `{"accountID", "email", "<TYPE>": id}` with the API key in the query
/// string.
///
/// # Errors
///
/// Raises [`AerisError::Api`](crate::AerisError::Api) on a non-200 status,
/// or on a 200 whose `resultCode` is missing or non-zero (the message then
/// contains the code).
#[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
pub async fn get_device_details(
    client: &AerisClient,
    account: &Account,
    email: &str,
    device: &DeviceId,
) -> Result<DeviceDetails> {
    let mut device_field = Map::new();
    device_field.insert(
        device.id_type.as_str().to_string(),
        Value::String(device.value.clone()),
    );

    let body = DeviceQuery {
        account_id: &account.id,
        email,
        device: device_field,
    };

    let url = client.endpoints().device_details();
    client
        .post(&url, &account.api_key, &body)
        .await?
        .expect_result_code()
}

/// Fetch a device's network attributes (registration, data session).
///
/// GETs with `accountID`, `apiKey`, `email` and `<TYPE>=id` as query
/// parameters and no body.
///
/// # Errors
///
/// Same classification as [`get_device_details`].
#[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
pub async fn get_device_network_details(
    client: &AerisClient,
    account: &Account,
    email: &str,
    device: &DeviceId,
) -> Result<NetworkDetails> {
    let query = [
        ("accountID", account.id.as_str()),
        ("apiKey", account.api_key.as_str()),
        ("email", email),
        (device.id_type.as_str(), device.value.as_str()),
    ];

    let url = client.endpoints().device_network_details();
    client
        .get_with_query(&url, &query)
        .await?
        .expect_result_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_id_type_parsing() {
        assert_eq!("iccid".parse::<DeviceIdType>().unwrap(), DeviceIdType::Iccid);
        assert_eq!("IMSI".parse::<DeviceIdType>().unwrap(), DeviceIdType::Imsi);
        assert!("IMEI".parse::<DeviceIdType>().is_err());
        assert_eq!(serde_json::to_value(DeviceIdType::Msisdn).unwrap(), "MSISDN");
    }

    #[test]
    fn test_device_query_flattens_identifier() {
        let mut device = Map::new();
        device.insert("IMSI".into(), json!("123"));
        let body = DeviceQuery {
            account_id: "1",
            email: "foo@bar.com",
            device,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"accountID": "1", "email": "foo@bar.com", "IMSI": "123"})
        );
    }

    #[test]
    fn test_device_details_preserves_body() {
        let body = json!({
            "transactionID": "deadbeef",
            "resultCode": 0,
            "resultMessage": "OK",
            "deviceProfileId": "AER0000012345678",
            "deviceAttributes": [{
                "result": {"resultCode": 0, "resultMessage": "OK"},
                "deviceID": {"iccId": "8918", "msisdn": "111", "imsi": "2040"},
                "deviceStatus": "Bill",
                "active": true
            }],
            "customField": {}
        });

        let details: DeviceDetails = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(details.identifiers().unwrap().imsi.as_deref(), Some("2040"));
        assert_eq!(serde_json::to_value(&details).unwrap(), body);
    }

    #[test]
    fn test_network_details_registration() {
        let details: NetworkDetails = serde_json::from_value(json!({
            "resultCode": 0,
            "networkResponse": [{"registration": {"isRegistered": true}}]
        }))
        .unwrap();
        assert_eq!(details.is_registered(), Some(true));
    }
}
