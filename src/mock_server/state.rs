//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Aeris API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Map;
use tokio::sync::RwLock;

use crate::{
    Application, Channel, ChannelData, DeliveryInfo, DeliveryInfoNotification, InboundSubscription,
    NotificationBatch, OutboundSubscription,
};

/// A device known to the mock AerAdmin service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDevice {
    pub iccid: String,
    pub imsi: String,
    pub msisdn: String,
    pub status: String,
    /// Whether SMS requests to this device are accepted.
    pub sms_capable: bool,
}

impl MockDevice {
    /// Whether `value` is one of this device's identifiers of kind `id_type`.
    pub fn matches(&self, id_type: &str, value: &str) -> bool {
        match id_type.to_ascii_uppercase().as_str() {
            "ICCID" => self.iccid == value,
            "IMSI" => self.imsi == value,
            "MSISDN" => self.msisdn == value,
            _ => false,
        }
    }
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Base URL the server listens on; used to build `resourceURL`s.
    pub base_url: String,

    /// The one account the server accepts.
    pub account_id: String,

    /// Account-level API key.
    pub api_key: String,

    /// Applications indexed by ID.
    pub applications: BTreeMap<String, Application>,

    /// Channels indexed by ID.
    pub channels: BTreeMap<String, Channel>,

    /// Outbound subscriptions indexed by ID, with the owning application's
    /// short name.
    pub outbound_subscriptions: BTreeMap<String, (String, OutboundSubscription)>,

    pub inbound_subscriptions: Vec<InboundSubscription>,

    pub devices: Vec<MockDevice>,

    /// Notifications waiting to be long-polled, by channel ID.
    pub pending: HashMap<String, NotificationBatch>,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state for one account.
    pub fn new(account_id: &str, api_key: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            api_key: api_key.to_string(),
            ..Default::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a device to the state.
    pub fn with_device(mut self, device: MockDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// Add an inbound subscription to the state.
    pub fn with_inbound_subscription(mut self, subscription: InboundSubscription) -> Self {
        self.inbound_subscriptions.push(subscription);
        self
    }

    /// A new resource ID. IDs sort in creation order.
    pub fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:08x}-0000-4000-8000-{:012x}", self.next_id, self.next_id)
    }

    /// Whether `account_id` and `api_key` identify the account itself.
    pub fn is_account(&self, account_id: &str, api_key: Option<&str>) -> bool {
        account_id == self.account_id && api_key == Some(self.api_key.as_str())
    }

    /// Whether `api_key` belongs to the application `short_name`.
    pub fn is_application(&self, account_id: &str, short_name: &str, api_key: Option<&str>) -> bool {
        account_id == self.account_id
            && self.applications.values().any(|a| {
                a.application_short_name == short_name && a.api_key.as_deref() == api_key
            })
    }

    /// Whether `api_key` is the account key or any application's key.
    pub fn is_known_key(&self, api_key: Option<&str>) -> bool {
        api_key == Some(self.api_key.as_str())
            || self
                .applications
                .values()
                .any(|a| a.api_key.is_some() && a.api_key.as_deref() == api_key)
    }

    /// Register an application, generating its ID and key.
    pub fn insert_application(
        &mut self,
        short_name: &str,
        name: Option<String>,
        tag: Option<String>,
        description: Option<String>,
    ) -> Application {
        let id = self.next_id();
        let app = Application {
            application_name: name,
            application_short_name: short_name.to_string(),
            application_tag: tag,
            description,
            api_key: Some(format!("app-key-{id}")),
            resource_url: format!(
                "{}/registration/v2/{}/applications/{id}",
                self.base_url, self.account_id
            ),
            extra: Map::new(),
        };
        self.applications.insert(id, app.clone());
        app
    }

    /// Allocate a long-poll channel.
    pub fn insert_channel(&mut self, application_tag: &str) -> Channel {
        let id = self.next_id();
        let resource_url = format!(
            "{}/notificationchannel/v2/{}/channels/{id}",
            self.base_url, self.account_id
        );
        let channel = Channel {
            application_tag: application_tag.to_string(),
            channel_type: Some("LongPolling".to_string()),
            channel_data: Some(ChannelData {
                channel_url: Some(format!(
                    "{}/notificationchannel/v2/{}/longpoll/{id}",
                    self.base_url, self.account_id
                )),
                max_notifications: Some(15.into()),
                extra: Map::new(),
            }),
            callback_url: Some(format!("{resource_url}/callback")),
            resource_url,
            extra: Map::new(),
        };
        self.channels.insert(id, channel.clone());
        channel
    }

    /// Store an outbound subscription, assigning its resource URL.
    pub fn insert_outbound_subscription(
        &mut self,
        app_short_name: &str,
        mut subscription: OutboundSubscription,
    ) -> OutboundSubscription {
        let id = self.next_id();
        subscription.resource_url = format!(
            "{}/smsmessaging/v2/{}/outbound/{app_short_name}/subscriptions/{id}",
            self.base_url, self.account_id
        );
        self.outbound_subscriptions
            .insert(id, (app_short_name.to_string(), subscription.clone()));
        subscription
    }

    /// Subscriptions belonging to one application, in creation order.
    pub fn outbound_subscriptions_for(&self, app_short_name: &str) -> Vec<&OutboundSubscription> {
        self.outbound_subscriptions
            .values()
            .filter(|(app, _)| app == app_short_name)
            .map(|(_, s)| s)
            .collect()
    }

    pub fn find_device(&self, id_type: &str, value: &str) -> Option<&MockDevice> {
        self.devices.iter().find(|d| d.matches(id_type, value))
    }

    /// Queue a delivery receipt on the channel the application's
    /// subscription notifies.
    pub fn queue_delivery_receipt(&mut self, app_short_name: &str, imsi: &str) {
        let Some(subscription) = self.outbound_subscriptions_for(app_short_name).first().cloned()
        else {
            return;
        };
        let Some(callback) = subscription.callback_reference.clone() else {
            return;
        };
        let Some(channel_id) = self
            .channels
            .iter()
            .find(|(_, c)| c.callback_url.as_deref() == Some(callback.notify_url.as_str()))
            .map(|(id, _)| id.clone())
        else {
            return;
        };

        let receipt = DeliveryInfo {
            address: imsi.to_string(),
            delivery_status: "DeliveredToTerminal".to_string(),
            description: None,
            link: Vec::new(),
            extra: Map::new(),
        };
        let batch = self.pending.entry(channel_id).or_default();
        match batch.delivery_info_notification.first_mut() {
            Some(notification) => notification.delivery_info.push(receipt),
            None => batch.delivery_info_notification.push(DeliveryInfoNotification {
                callback_data: callback.callback_data.clone(),
                delivery_info: vec![receipt],
                extra: Map::new(),
            }),
        }
    }

    /// Hand out and clear the notifications queued on a channel.
    pub fn drain_channel(&mut self, channel_id: &str) -> NotificationBatch {
        self.pending.remove(channel_id).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_ids_sort_in_creation_order() {
        let mut state = MockState::new("1", "key");
        let a = state.next_id();
        let b = state.next_id();
        assert!(a < b);
    }

    #[test]
    fn test_application_keys_are_known() {
        let mut state = MockState::new("1", "key");
        let app = state.insert_application("app", None, None, None);

        assert!(state.is_known_key(Some("key")));
        assert!(state.is_known_key(app.api_key.as_deref()));
        assert!(!state.is_known_key(Some("other")));
        assert!(!state.is_known_key(None));
        assert!(state.is_application("1", "app", app.api_key.as_deref()));
        assert!(!state.is_application("1", "app", Some("key")));
    }

    #[test]
    fn test_device_lookup() {
        let state = MockState::new("1", "key").with_device(Fixtures::device(
            "89010000000000000001",
            "310170000000001",
            "15550000001",
        ));

        assert!(state.find_device("iccid", "89010000000000000001").is_some());
        assert!(state.find_device("IMSI", "310170000000001").is_some());
        assert!(state.find_device("IMSI", "nope").is_none());
    }

    #[test]
    fn test_drain_channel_empties_queue() {
        let mut state = MockState::new("1", "key");
        state
            .pending
            .insert("ch".to_string(), NotificationBatch::default());
        let _ = state.drain_channel("ch");
        assert!(state.pending.is_empty());
    }
}
