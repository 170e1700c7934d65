//! Aeris IoT API client library.
//!
//! A Rust library for the Aeris connectivity services: AerAdmin (device
//! administration), AerTraffic (usage reports) and AerFrame (applications,
//! notification channels, SMS subscriptions, messaging and network
//! services). Resource operations are traits that entity types implement;
//! one-off calls are plain async functions.
//!
//! # Quick Start
//!
//! ```no_run
//! use aerisapi::{Account, AerisClient, Application, DeviceId, DeviceIdType, Get, Search};
//!
//! #[tokio::main]
//! async fn main() -> aerisapi::Result<()> {
//!     // Production endpoints, overridable through AERIS_*_URL variables
//!     let client = AerisClient::from_env()?;
//!     let account = Account::new("12345", "my-api-key");
//!
//!     // AerAdmin: device details (HTTP 200 *and* resultCode 0)
//!     let device = DeviceId::new(DeviceIdType::Iccid, "89148000000000000000");
//!     let details =
//!         aerisapi::get_device_details(&client, &account, "me@example.com", &device).await?;
//!     println!("{:?}", details.identifiers());
//!
//!     // AerFrame: look an application up by short name
//!     if let Some(id) = Application::find_id(&client, &account, "aerframesdk").await? {
//!         let app = Application::get(&client, &account, &id).await?;
//!         println!("Application: {}", app.application_short_name);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Every call reads the full response into an [`ApiResponse`] and then
//! applies the acceptance rule of its endpoint. Anything outside the rule is
//! returned as [`AerisError::Api`] with the response attached. The rules
//! differ per endpoint and are documented on each operation:
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch a collection
//! - [`Search`] - Resolve an ID from a short name or tag
//! - [`Create`] - Create an entity
//! - [`Delete`] - Delete an entity; `Ok(false)` when it was already gone
//!
//! # Configuration
//!
//! Base URLs come from [`Endpoints`]. Credentials are passed to every
//! operation through [`Account`]; the library never reads the profile file
//! the `aerisapi` binary keeps.

mod account;
mod client;
mod error;
mod response;

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod resource_id;
pub mod traits;
pub mod workflow;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use account::{Account, AppScope};
pub use client::AerisClient;
pub use config::{Endpoints, Profile};
pub use error::{AerisError, Result};
pub use response::{ApiResponse, ResultEnvelope};

// Re-export traits
pub use traits::{Create, Delete, Get, List, Search};

// Re-export models
pub use models::{
    // AerAdmin types
    DeviceAttributes,
    DeviceDetails,
    DeviceId,
    DeviceIdType,
    DeviceIdentifiers,
    NetworkDetails,
    // AerFrame types
    Application,
    CallbackReference,
    Channel,
    ChannelData,
    InboundSubscription,
    NetworkLocation,
    NewApplication,
    NewChannel,
    NewOutboundSubscription,
    OutboundSms,
    OutboundSubscription,
    SmsText,
    // Notification types
    DeliveryInfo,
    DeliveryInfoNotification,
    FlushReport,
    InboundSmsMessage,
    InboundSmsNotification,
    Link,
    NotificationBatch,
    Pause,
    PollSummary,
    TokioPause,
    // Ping types
    PingReport,
    Service,
};

// Re-export convenience functions
pub use models::{get_device_details, get_device_network_details};
pub use models::{get_device_summary_report, ping, ping_all};
pub use models::{get_location, notifications_flush_search, poll_notification_channel, send_mt_sms};
