//! AerTraffic reports.

use crate::account::Account;
use crate::client::AerisClient;
use crate::error::Result;
use crate::response::ApiResponse;

/// Fetch the device summary report for the last three months.
///
/// The response is returned as-is whatever its status; the report endpoint
/// has no success contract to check. Only transport errors propagate.
#[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
pub async fn get_device_summary_report(
    client: &AerisClient,
    account: &Account,
) -> Result<ApiResponse> {
    let url = client.endpoints().device_summary(&account.id);
    let query = [
        ("apiKey", account.api_key.as_str()),
        ("durationInMonths", "3"),
        ("subAccounts", "false"),
    ];

    tracing::info!("Endpoint: {url}");
    let response = client.get_with_query(&url, &query).await?;
    tracing::info!(status = response.status(), "Response code: {}", response.status());
    tracing::debug!("{}", response.body());
    Ok(response)
}
