//! AerFrame long-poll notification channels.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::account::Account;
use crate::client::AerisClient;
use crate::error::Result;
use crate::resource_id::{self, CHANNELS};
use crate::traits::{Create, Delete, Get, Search};

/// A notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub application_tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<ChannelData>,

    #[serde(rename = "callbackURL", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    #[serde(rename = "resourceURL")]
    pub resource_url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Long-poll specifics of a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelData {
    /// Where notifications are polled from.
    #[serde(rename = "channelURL", default, skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<String>,

    /// Sent as a string, returned as a number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_notifications: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Channel {
    /// The channel ID, taken from `resourceURL`.
    pub fn id(&self) -> Option<&str> {
        resource_id::extract(&self.resource_url, CHANNELS)
    }

    /// The long-poll URL notifications are fetched from.
    pub fn channel_url(&self) -> Option<&str> {
        self.channel_data
            .as_ref()
            .and_then(|d| d.channel_url.as_deref())
    }
}

/// Parameters for creating a channel.
#[derive(Debug, Clone)]
pub struct NewChannel {
    pub application_tag: String,
}

impl NewChannel {
    pub fn new(application_tag: impl Into<String>) -> Self {
        Self {
            application_tag: application_tag.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateChannelRequest<'a> {
    application_tag: &'a str,
    channel_data: CreateChannelData,
    channel_type: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateChannelData {
    max_notifications: &'static str,
    #[serde(rename = "type")]
    data_type: &'static str,
}

impl<'a> CreateChannelRequest<'a> {
    fn long_polling(application_tag: &'a str) -> Self {
        Self {
            application_tag,
            channel_data: CreateChannelData {
                max_notifications: "15",
                data_type: "nc:LongPollingData",
            },
            channel_type: "LongPolling",
        }
    }
}

/// API response wrapper for listing channels.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelListResponse {
    #[serde(default)]
    notification_channel: Vec<Channel>,
}

#[async_trait]
impl Get for Channel {
    type Scope = Account;
    type Output = Option<Channel>;

    /// 200 returns the channel, 404 returns `None`.
    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn get(
        client: &AerisClient,
        account: &Account,
        channel_id: &str,
    ) -> Result<Option<Channel>> {
        let url = client.endpoints().channel(&account.id, Some(channel_id));
        client
            .get(&url, &account.api_key)
            .await?
            .json_or_absent(200, 404)
    }
}

#[async_trait]
impl Search for Channel {
    type Scope = Account;

    /// Find a channel by `applicationTag`.
    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn find_id(
        client: &AerisClient,
        account: &Account,
        application_tag: &str,
    ) -> Result<Option<String>> {
        let url = client.endpoints().channel(&account.id, None);
        let response = client
            .get(&url, &account.api_key)
            .await?
            .expect_status(200)?;
        let data: ChannelListResponse = response.json()?;

        let Some(channel) = resource_id::last_match(&data.notification_channel, |c| {
            c.application_tag == application_tag
        }) else {
            tracing::info!("{application_tag} channel does not exist");
            return Ok(None);
        };

        match channel.id() {
            Some(id) => {
                tracing::info!("{application_tag} channel exists. Channel ID: {id}");
                Ok(Some(id.to_string()))
            }
            None => {
                let message = format!(
                    "channel {application_tag} has a resourceURL without '{CHANNELS}': {}",
                    channel.resource_url
                );
                Err(response.into_error(message))
            }
        }
    }
}

#[async_trait]
impl Create for Channel {
    type Scope = Account;
    type Params = NewChannel;

    /// POST a long-poll channel; this endpoint answers 200, not 201.
    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn create(client: &AerisClient, account: &Account, params: NewChannel) -> Result<Self> {
        let body = CreateChannelRequest::long_polling(&params.application_tag);
        let url = client.endpoints().channel(&account.id, None);
        let channel: Channel = client
            .post(&url, &account.api_key, &body)
            .await?
            .expect_json(200)?;
        tracing::info!(
            "Created notification channel for {}",
            params.application_tag
        );
        Ok(channel)
    }
}

#[async_trait]
impl Delete for Channel {
    type Scope = Account;

    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn delete(client: &AerisClient, account: &Account, channel_id: &str) -> Result<bool> {
        let url = client.endpoints().channel(&account.id, Some(channel_id));
        let deleted = client.delete(&url, &account.api_key).await?.deletion()?;
        if deleted {
            tracing::info!("Channel successfully deleted.");
        } else {
            tracing::info!("Channel ID does not match current application.");
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
        assert_eq!(
            serde_json::to_value(CreateChannelRequest::long_polling("tag")).unwrap(),
            json!({
                "applicationTag": "tag",
                "channelData": {"maxNotifications": "15", "type": "nc:LongPollingData"},
                "channelType": "LongPolling"
            })
        );
    }

    #[test]
    fn test_channel_accessors() {
        let channel: Channel = serde_json::from_value(json!({
            "applicationTag": "aerframe",
            "channelType": "LongPolling",
            "channelData": {
                "channelURL": "https://lp/notificationchannel/v2/1/longpoll/abc",
                "maxNotifications": 15
            },
            "callbackURL": "https://api/notificationchannel/v2/1/channels/abc/callback",
            "resourceURL": "https://api/notificationchannel/v2/1/channels/abc"
        }))
        .unwrap();

        assert_eq!(channel.id(), Some("abc"));
        assert_eq!(
            channel.channel_url(),
            Some("https://lp/notificationchannel/v2/1/longpoll/abc")
        );
    }
}
