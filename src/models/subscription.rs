//! AerFrame SMS subscriptions.
//!
//! Inbound subscriptions route mobile-originated SMS to an application;
//! outbound subscriptions deliver mobile-terminated delivery receipts
//! (MT-DR). Outbound subscription calls authenticate with the application's
//! own API key.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::account::{Account, AppScope};
use crate::client::AerisClient;
use crate::error::{AerisError, Result};
use crate::resource_id::{self, SUBSCRIPTIONS};
use crate::traits::{Create, Delete, Get, List, Search};

/// Filter applied to outbound subscriptions created by this crate.
pub const DEFAULT_FILTER_CRITERIA: &str = "SP:*";

/// Where AerFrame delivers notifications for a subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackReference {
    #[serde(rename = "notifyURL")]
    pub notify_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_format: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A mobile-originated SMS subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundSubscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_reference: Option<CallbackReference>,

    /// Application short names the subscription delivers to.
    #[serde(default)]
    pub destination_address: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<String>,

    #[serde(rename = "resourceURL")]
    pub resource_url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InboundSubscription {
    pub fn id(&self) -> Option<&str> {
        resource_id::extract(&self.resource_url, SUBSCRIPTIONS)
    }
}

/// A delivery-receipt subscription for one application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundSubscription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_reference: Option<CallbackReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_criteria: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destination_address: Vec<String>,

    #[serde(rename = "resourceURL")]
    pub resource_url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutboundSubscription {
    pub fn id(&self) -> Option<&str> {
        resource_id::extract(&self.resource_url, SUBSCRIPTIONS)
    }
}

/// Parameters for creating an outbound subscription.
#[derive(Debug, Clone)]
pub struct NewOutboundSubscription {
    /// Channel that receives the delivery receipts.
    pub channel_id: String,
}

impl NewOutboundSubscription {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateOutboundSubscriptionRequest<'a> {
    callback_reference: CallbackReference,
    filter_criteria: &'static str,
    destination_address: [&'a str; 1],
}

impl<'a> CreateOutboundSubscriptionRequest<'a> {
    fn new(app_short_name: &'a str, notify_url: String) -> Self {
        Self {
            callback_reference: CallbackReference {
                notify_url,
                callback_data: Some(format!("{app_short_name}-mt")),
                notification_format: None,
                extra: Map::new(),
            },
            filter_criteria: DEFAULT_FILTER_CRITERIA,
            destination_address: [app_short_name],
        }
    }
}

#[derive(Debug, Deserialize)]
struct InboundSubscriptionListResponse {
    #[serde(default)]
    subscription: Vec<InboundSubscription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutboundSubscriptionListResponse {
    #[serde(default)]
    delivery_receipt_subscription: Option<Vec<OutboundSubscription>>,
}

#[async_trait]
impl List for InboundSubscription {
    type Scope = Account;

    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn list(client: &AerisClient, account: &Account) -> Result<Vec<Self>> {
        let url = client.endpoints().inbound_subscriptions(&account.id);
        let data: InboundSubscriptionListResponse =
            client.get(&url, &account.api_key).await?.expect_json(200)?;
        Ok(data.subscription)
    }
}

#[async_trait]
impl Search for InboundSubscription {
    type Scope = Account;

    /// Find the subscription whose `destinationAddress` lists the
    /// application short name.
    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn find_id(
        client: &AerisClient,
        account: &Account,
        app_short_name: &str,
    ) -> Result<Option<String>> {
        let url = client.endpoints().inbound_subscriptions(&account.id);
        let response = client
            .get(&url, &account.api_key)
            .await?
            .expect_status(200)?;
        let data: InboundSubscriptionListResponse = response.json()?;

        let Some(subscription) = resource_id::last_match(&data.subscription, |s| {
            s.destination_address.iter().any(|a| a == app_short_name)
        }) else {
            tracing::info!("{app_short_name} has no inbound subscriptions.");
            return Ok(None);
        };

        match subscription.id() {
            Some(id) => Ok(Some(id.to_string())),
            None => {
                let message = format!(
                    "inbound subscription for {app_short_name} has a resourceURL without '{SUBSCRIPTIONS}': {}",
                    subscription.resource_url
                );
                Err(response.into_error(message))
            }
        }
    }
}

#[async_trait]
impl Search for OutboundSubscription {
    type Scope = Account;

    /// Find the delivery-receipt subscription of an application.
    ///
    /// A listing without a `deliveryReceiptSubscription` array, or with an
    /// empty one, means there is none. Otherwise the first entry is used.
    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn find_id(
        client: &AerisClient,
        account: &Account,
        app_short_name: &str,
    ) -> Result<Option<String>> {
        let url = client
            .endpoints()
            .outbound_subscriptions(&account.id, app_short_name, None);
        let response = client
            .get(&url, &account.api_key)
            .await?
            .expect_status(200)?;
        let data: OutboundSubscriptionListResponse = response.json()?;

        let Some(subscription) = data
            .delivery_receipt_subscription
            .as_deref()
            .and_then(<[OutboundSubscription]>::first)
        else {
            tracing::info!("{app_short_name} has no outbound (MT-DR) subscriptions.");
            return Ok(None);
        };

        match subscription.id() {
            Some(id) => {
                tracing::info!("{app_short_name} subscription ID: {id}");
                Ok(Some(id.to_string()))
            }
            None => {
                let message = format!(
                    "outbound subscription for {app_short_name} has a resourceURL without '{SUBSCRIPTIONS}': {}",
                    subscription.resource_url
                );
                Err(response.into_error(message))
            }
        }
    }
}

#[async_trait]
impl Get for OutboundSubscription {
    type Scope = AppScope;
    type Output = Option<OutboundSubscription>;

    /// 200 returns the subscription, 404 returns `None`.
    #[tracing::instrument(skip(client, scope), fields(app = %scope.app_short_name))]
    async fn get(
        client: &AerisClient,
        scope: &AppScope,
        subscription_id: &str,
    ) -> Result<Option<OutboundSubscription>> {
        let url = client.endpoints().outbound_subscriptions(
            &scope.account.id,
            &scope.app_short_name,
            Some(subscription_id),
        );
        client
            .get(&url, &scope.account.api_key)
            .await?
            .json_or_absent(200, 404)
    }
}

#[async_trait]
impl Create for OutboundSubscription {
    type Scope = AppScope;
    type Params = NewOutboundSubscription;

    /// POST a subscription routing receipts to the channel's callback URL;
    /// success is 201 Created.
    #[tracing::instrument(skip(client, scope), fields(app = %scope.app_short_name))]
    async fn create(
        client: &AerisClient,
        scope: &AppScope,
        params: NewOutboundSubscription,
    ) -> Result<Self> {
        if params.channel_id.is_empty() {
            return Err(AerisError::ConfigMissing(
                "channel ID required for an outbound subscription".to_string(),
            ));
        }

        let endpoints = client.endpoints();
        let notify_url = endpoints.channel_callback(&scope.account.id, &params.channel_id);
        let body = CreateOutboundSubscriptionRequest::new(&scope.app_short_name, notify_url);

        let url = endpoints.outbound_subscriptions(&scope.account.id, &scope.app_short_name, None);
        let subscription: OutboundSubscription = client
            .post(&url, &scope.account.api_key, &body)
            .await?
            .expect_json(201)?;
        tracing::info!(
            "Created outbound (MT-DR) subscription for {}",
            scope.app_short_name
        );
        Ok(subscription)
    }
}

#[async_trait]
impl Delete for OutboundSubscription {
    type Scope = AppScope;

    #[tracing::instrument(skip(client, scope), fields(app = %scope.app_short_name))]
    async fn delete(client: &AerisClient, scope: &AppScope, subscription_id: &str) -> Result<bool> {
        let url = client.endpoints().outbound_subscriptions(
            &scope.account.id,
            &scope.app_short_name,
            Some(subscription_id),
        );
        let deleted = client
            .delete(&url, &scope.account.api_key)
            .await?
            .deletion()?;
        if deleted {
            tracing::info!("Subscription successfully deleted.");
        } else {
            tracing::info!("Subscription ID does not match current application.");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_body() {
        let body = CreateOutboundSubscriptionRequest::new(
            "app",
            "https://localhost/notificationchannel/v2/1/channels/ch/callback".to_string(),
        );
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "callbackReference": {
                    "callbackData": "app-mt",
                    "notifyURL": "https://localhost/notificationchannel/v2/1/channels/ch/callback"
                },
                "filterCriteria": "SP:*",
                "destinationAddress": ["app"]
            })
        );
    }

    #[test]
    fn test_outbound_listing_without_receipts() {
        let data: OutboundSubscriptionListResponse =
            serde_json::from_value(json!({"resourceUrl": "https://localhost/x"})).unwrap();
        assert!(data.delivery_receipt_subscription.is_none());
    }

    #[test]
    fn test_inbound_subscription_id_with_double_slash() {
        let sub: InboundSubscription = serde_json::from_value(json!({
            "destinationAddress": ["app-2"],
            "resourceURL": "https://localhost/smsmessaging/v2/1/inbound/subscriptions//sub-2"
        }))
        .unwrap();
        assert_eq!(sub.id(), Some("sub-2"));
    }
}
