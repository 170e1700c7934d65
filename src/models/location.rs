//! Network location of a device.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::account::Account;
use crate::client::AerisClient;
use crate::error::Result;
use crate::models::DeviceId;

/// Cell-level location as reported by the network.
///
/// The numeric fields are kept as JSON values; the network reports them as
/// numbers or strings depending on the record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcc: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnc: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lac: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_id: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_timestamp: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fetch the network location of a device.
///
/// # Errors
///
/// Any status other than 200, including 404.
#[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
pub async fn get_location(
    client: &AerisClient,
    account: &Account,
    device: &DeviceId,
) -> Result<NetworkLocation> {
    let url = client.endpoints().network_location(&account.id, device);
    client.get(&url, &account.api_key).await?.expect_json(200)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_location_keeps_unknown_fields() {
        let body = json!({
            "responseType": "Cell ID",
            "mcc": 310,
            "mnc": 170,
            "lac": 1234,
            "cellId": 5678,
            "locationTimestamp": 0.0,
            "ageOfLocation": 3,
            "destinationType": "CS"
        });
        let location: NetworkLocation = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(location.cell_id, Some(json!(5678)));
        assert_eq!(serde_json::to_value(&location).unwrap(), body);
    }
}
