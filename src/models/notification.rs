//! Long-poll notification retrieval.
//!
//! A channel's long-poll URL returns the notifications queued since the
//! previous poll: delivery receipts for mobile-terminated SMS and inbound
//! (mobile-originated) messages. Each poll is an independent GET.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::AerisClient;
use crate::error::Result;

/// One batch returned by a long-poll request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationBatch {
    #[serde(default)]
    pub delivery_info_notification: Vec<DeliveryInfoNotification>,

    #[serde(rename = "inboundSMSMessageNotification", default)]
    pub inbound_sms_message_notification: Vec<InboundSmsNotification>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NotificationBatch {
    /// Number of delivery receipts across all delivery notifications.
    pub fn delivery_receipt_count(&self) -> usize {
        self.delivery_info_notification
            .iter()
            .map(|n| n.delivery_info.len())
            .sum()
    }

    pub fn inbound_message_count(&self) -> usize {
        self.inbound_sms_message_notification.len()
    }

    /// Whether the batch carries no notifications of either kind.
    pub fn is_empty(&self) -> bool {
        self.delivery_info_notification.is_empty() && self.inbound_sms_message_notification.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfoNotification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,

    #[serde(default)]
    pub delivery_info: Vec<DeliveryInfo>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Delivery status of one mobile-terminated message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub address: String,

    /// `DeliveredToTerminal`, `DeliveryImpossible`, ...
    pub delivery_status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<Link>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundSmsNotification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,

    #[serde(rename = "inboundSMSMessage")]
    pub inbound_sms_message: InboundSmsMessage,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A mobile-originated message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundSmsMessage {
    pub destination_address: String,
    pub sender_address: String,

    /// Message payload as delivered, usually base64.
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding_scheme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_code: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link: Vec<Link>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// Counts reported for one poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSummary {
    pub delivery_receipts: usize,
    pub inbound_messages: usize,
}

impl From<&NotificationBatch> for PollSummary {
    fn from(batch: &NotificationBatch) -> Self {
        Self {
            delivery_receipts: batch.delivery_receipt_count(),
            inbound_messages: batch.inbound_message_count(),
        }
    }
}

/// Outcome of [`notifications_flush_search`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlushReport {
    /// One entry per poll issued, in order.
    pub polls: Vec<PollSummary>,

    /// True when a poll came back empty before the limit was reached.
    pub drained: bool,
}

/// The wait between two polls.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, interval: Duration);
}

/// [`Pause`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, interval: Duration) {
        if !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }
}

/// Fetch one batch from a channel's long-poll URL.
///
/// # Errors
///
/// Any status other than 200.
#[tracing::instrument(skip(client, api_key))]
pub async fn poll_notification_channel(
    client: &AerisClient,
    api_key: &str,
    channel_url: &str,
) -> Result<NotificationBatch> {
    tracing::info!("Polling channelURL for polling interval: {channel_url}");
    client.get(channel_url, api_key).await?.expect_json(200)
}

/// Poll a channel up to `num` times, reporting counts per poll.
///
/// Stops early when a batch is empty. `pause` is awaited with `interval`
/// between consecutive polls, never after the last one.
///
/// # Errors
///
/// The first failed poll ends the loop with its error.
#[tracing::instrument(skip(client, api_key, pause))]
pub async fn notifications_flush_search(
    client: &AerisClient,
    api_key: &str,
    channel_url: &str,
    num: usize,
    interval: Duration,
    pause: &dyn Pause,
) -> Result<FlushReport> {
    let mut report = FlushReport::default();

    for attempt in 0..num {
        if attempt > 0 {
            pause.pause(interval).await;
        }

        let batch = poll_notification_channel(client, api_key, channel_url).await?;
        if batch.is_empty() {
            tracing::info!("No pending notifications");
            report.drained = true;
            break;
        }

        let summary = PollSummary::from(&batch);
        tracing::info!(
            delivery_receipts = summary.delivery_receipts,
            inbound_messages = summary.inbound_messages,
            "Number of notifications = {}",
            summary.delivery_receipts + summary.inbound_messages
        );
        report.polls.push(summary);
    }

    Ok(report)
}
