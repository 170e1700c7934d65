//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use serde_json::Map;

use super::state::{MockDevice, MockState};
use crate::{CallbackReference, InboundSubscription};

/// Account ID of the default scenario.
pub const ACCOUNT_ID: &str = "1";
/// Account API key of the default scenario.
pub const API_KEY: &str = "test-api-key";
/// Email of the default scenario's user.
pub const EMAIL: &str = "test@example.com";

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// A pre-populated account.
pub struct DefaultScenario {
    pub account_id: String,
    pub api_key: String,
    pub devices: Vec<MockDevice>,
    pub inbound_subscriptions: Vec<InboundSubscription>,
}

impl Fixtures {
    // =========================================================================
    // Device Fixtures
    // =========================================================================

    /// An active, SMS-capable device.
    pub fn device(iccid: &str, imsi: &str, msisdn: &str) -> MockDevice {
        MockDevice {
            iccid: iccid.to_string(),
            imsi: imsi.to_string(),
            msisdn: msisdn.to_string(),
            status: "Bill".to_string(),
            sms_capable: true,
        }
    }

    /// A device that rejects SMS.
    pub fn data_only_device(iccid: &str, imsi: &str, msisdn: &str) -> MockDevice {
        MockDevice {
            sms_capable: false,
            ..Self::device(iccid, imsi, msisdn)
        }
    }

    // =========================================================================
    // Subscription Fixtures
    // =========================================================================

    /// An inbound subscription delivering to `app_short_name`.
    ///
    /// `resource_url` is taken as given so tests can reproduce the
    /// double-slash URLs the real service returns.
    pub fn inbound_subscription(app_short_name: &str, resource_url: &str) -> InboundSubscription {
        InboundSubscription {
            callback_reference: Some(CallbackReference {
                notify_url: "https://example.invalid/callback".to_string(),
                callback_data: Some(format!("{app_short_name}-mo")),
                notification_format: Some("JSON".to_string()),
                extra: Map::new(),
            }),
            destination_address: vec![app_short_name.to_string()],
            criteria: Some("SP:*".to_string()),
            resource_url: resource_url.to_string(),
            extra: Map::new(),
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// One account with two devices, the second of which cannot receive SMS.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            account_id: ACCOUNT_ID.to_string(),
            api_key: API_KEY.to_string(),
            devices: vec![
                Self::device("89010000000000000001", "310170000000001", "15550000001"),
                Self::data_only_device("89010000000000000002", "310170000000002", "15550000002"),
            ],
            inbound_subscriptions: Vec::new(),
        }
    }
}

impl DefaultScenario {
    /// Build server state from the scenario.
    pub fn into_state(self) -> MockState {
        let mut state = MockState::new(&self.account_id, &self.api_key);
        state.devices = self.devices;
        state.inbound_subscriptions = self.inbound_subscriptions;
        state
    }
}
