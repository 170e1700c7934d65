//! Service endpoints and the persisted command-line profile.
//!
//! [`Endpoints`] is built once per process and handed to the client; every
//! resource URL is resolved from it by plain string concatenation. No
//! percent-encoding is applied to account or resource IDs.
//!
//! [`Profile`] is the JSON state file the `aerisapi` binary keeps between
//! runs. The library operations never read it; they take plain arguments.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AerisError, Result};
use crate::models::{Application, Channel, DeviceId, DeviceIdType, DeviceIdentifiers, OutboundSubscription};

/// Production AerAdmin base URL.
pub const DEFAULT_AERADMIN_URL: &str = "https://aeradminapi.aeris.com";
/// Production AerTraffic base URL.
pub const DEFAULT_AERTRAFFIC_URL: &str = "https://aertrafficapi.aeris.com";
/// Production AerFrame API base URL.
pub const DEFAULT_AERFRAME_URL: &str = "https://api.aerframe.aeris.com";
/// Production AerFrame long-poll base URL.
pub const DEFAULT_LONGPOLL_URL: &str = "https://longpoll.aerframe.aeris.com";

/// Base URLs of the four Aeris services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    aeradmin: Url,
    aertraffic: Url,
    aerframe: Url,
    longpoll: Url,
}

impl Endpoints {
    /// Build endpoints from explicit base URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if any base URL is invalid.
    pub fn new(aeradmin: &str, aertraffic: &str, aerframe: &str, longpoll: &str) -> Result<Self> {
        Ok(Self {
            aeradmin: Url::parse(aeradmin)?,
            aertraffic: Url::parse(aertraffic)?,
            aerframe: Url::parse(aerframe)?,
            longpoll: Url::parse(longpoll)?,
        })
    }

    /// Point every service at the same base URL (mock servers, tests).
    pub fn uniform(base_url: &str) -> Result<Self> {
        Self::new(base_url, base_url, base_url, base_url)
    }

    /// Production URLs.
    pub fn production() -> Result<Self> {
        Self::new(
            DEFAULT_AERADMIN_URL,
            DEFAULT_AERTRAFFIC_URL,
            DEFAULT_AERFRAME_URL,
            DEFAULT_LONGPOLL_URL,
        )
    }

    /// Production URLs, overridden by `AERIS_AERADMIN_URL`,
    /// `AERIS_AERTRAFFIC_URL`, `AERIS_AERFRAME_URL` and `AERIS_LONGPOLL_URL`
    /// when set.
    pub fn from_env() -> Result<Self> {
        let pick = |var: &str, default: &str| env::var(var).unwrap_or_else(|_| default.to_string());

        Self::new(
            &pick("AERIS_AERADMIN_URL", DEFAULT_AERADMIN_URL),
            &pick("AERIS_AERTRAFFIC_URL", DEFAULT_AERTRAFFIC_URL),
            &pick("AERIS_AERFRAME_URL", DEFAULT_AERFRAME_URL),
            &pick("AERIS_LONGPOLL_URL", DEFAULT_LONGPOLL_URL),
        )
    }

    fn root(url: &Url) -> &str {
        url.as_str().trim_end_matches('/')
    }

    /// AerAdmin base URL plus a trailing slash.
    pub fn aeradmin_base(&self) -> String {
        format!("{}/", Self::root(&self.aeradmin))
    }

    /// Root of the AerAdmin 5.0 REST API.
    pub fn aeradmin_rest(&self) -> String {
        format!("{}AerAdmin_WS_5_0/rest/", self.aeradmin_base())
    }

    pub fn device_details(&self) -> String {
        format!("{}devices/details", self.aeradmin_rest())
    }

    pub fn device_network_details(&self) -> String {
        format!("{}devices/network/details", self.aeradmin_rest())
    }

    /// AerTraffic base URL plus a trailing slash.
    pub fn aertraffic_base(&self) -> String {
        format!("{}/", Self::root(&self.aertraffic))
    }

    /// Root of the AerTraffic v1 API.
    pub fn aertraffic_v1(&self) -> String {
        format!("{}v1/", self.aertraffic_base())
    }

    pub fn device_summary(&self, account_id: &str) -> String {
        format!("{}{account_id}/systemReports/deviceSummary", self.aertraffic_v1())
    }

    /// AerFrame applications collection, or one application.
    pub fn application(&self, account_id: &str, app_id: Option<&str>) -> String {
        let base = format!(
            "{}/registration/v2/{account_id}/applications",
            Self::root(&self.aerframe)
        );
        match app_id {
            Some(id) => format!("{base}/{id}"),
            None => base,
        }
    }

    /// AerFrame notification channels collection, or one channel.
    pub fn channel(&self, account_id: &str, channel_id: Option<&str>) -> String {
        let base = format!(
            "{}/notificationchannel/v2/{account_id}/channels",
            Self::root(&self.aerframe)
        );
        match channel_id {
            Some(id) => format!("{base}/{id}"),
            None => base,
        }
    }

    /// URL AerFrame posts notifications to for a channel.
    pub fn channel_callback(&self, account_id: &str, channel_id: &str) -> String {
        format!("{}/callback", self.channel(account_id, Some(channel_id)))
    }

    pub fn inbound_subscriptions(&self, account_id: &str) -> String {
        format!(
            "{}/smsmessaging/v2/{account_id}/inbound/subscriptions",
            Self::root(&self.aerframe)
        )
    }

    /// Outbound (MT delivery receipt) subscriptions of one application.
    pub fn outbound_subscriptions(
        &self,
        account_id: &str,
        app_short_name: &str,
        subscription_id: Option<&str>,
    ) -> String {
        let base = format!(
            "{}/smsmessaging/v2/{account_id}/outbound/{app_short_name}/subscriptions",
            Self::root(&self.aerframe)
        );
        match subscription_id {
            Some(id) => format!("{base}/{id}"),
            None => base,
        }
    }

    pub fn outbound_requests(&self, account_id: &str, app_short_name: &str) -> String {
        format!(
            "{}/smsmessaging/v2/{account_id}/outbound/{app_short_name}/requests",
            Self::root(&self.aerframe)
        )
    }

    pub fn network_location(&self, account_id: &str, device: &DeviceId) -> String {
        format!(
            "{}/networkservices/v2/{account_id}/devices/{}/{}/networkLocation",
            Self::root(&self.aerframe),
            device.id_type,
            device.value
        )
    }

    /// AerFrame long-poll base URL.
    pub fn longpoll_base(&self) -> String {
        Self::root(&self.longpoll).to_string()
    }
}

/// File name of the profile in the user's home directory.
pub const PROFILE_FILE_NAME: &str = ".aeris_config";

/// Command-line state persisted between runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_device_id_type: Option<DeviceIdType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_device_id: Option<String>,

    /// Application created or found by `aerframe init`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aerframe_application: Option<Application>,

    /// Notification channel created or found by `aerframe init`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aerframe_channel: Option<Channel>,

    /// Outbound subscription created or found by `aerframe init`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aerframe_subscription: Option<OutboundSubscription>,

    /// Identifiers of the primary device as reported by AerAdmin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<DeviceIdentifiers>,
}

impl Profile {
    /// `~/.aeris_config`, if a home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(PROFILE_FILE_NAME))
    }

    /// Load the profile. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write the profile as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn require_account_id(&self) -> Result<&str> {
        required(self.account_id.as_deref(), "accountId")
    }

    pub fn require_api_key(&self) -> Result<&str> {
        required(self.api_key.as_deref(), "apiKey")
    }

    pub fn require_email(&self) -> Result<&str> {
        required(self.email.as_deref(), "email")
    }

    /// The primary device as configured by the `config` command.
    pub fn require_primary_device(&self) -> Result<DeviceId> {
        let id_type = self.primary_device_id_type.ok_or_else(|| {
            AerisError::ConfigMissing("primaryDeviceIdType not set; run the config command".into())
        })?;
        let value = required(self.primary_device_id.as_deref(), "primaryDeviceId")?;
        Ok(DeviceId::new(id_type, value))
    }

    pub fn require_application(&self) -> Result<&Application> {
        self.aerframe_application.as_ref().ok_or_else(|| {
            AerisError::ConfigMissing("no AerFrame application; run 'aerframe init'".into())
        })
    }

    pub fn require_channel(&self) -> Result<&Channel> {
        self.aerframe_channel.as_ref().ok_or_else(|| {
            AerisError::ConfigMissing("no AerFrame channel; run 'aerframe init'".into())
        })
    }

    pub fn require_device_identifiers(&self) -> Result<&DeviceIdentifiers> {
        self.device_id.as_ref().ok_or_else(|| {
            AerisError::ConfigMissing("no device identifiers; run 'aerframe init'".into())
        })
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str> {
    value.ok_or_else(|| AerisError::ConfigMissing(format!("{key} not set; run the config command")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::uniform("https://localhost").unwrap()
    }

    #[test]
    fn test_aeradmin_base_has_trailing_slash() {
        assert_eq!(endpoints().aeradmin_base(), "https://localhost/");
        assert_eq!(
            endpoints().device_details(),
            "https://localhost/AerAdmin_WS_5_0/rest/devices/details"
        );
    }

    #[test]
    fn test_application_endpoint() {
        let e = endpoints();
        assert_eq!(
            e.application("123", None),
            "https://localhost/registration/v2/123/applications"
        );
        assert_eq!(
            e.application("123", Some("42")),
            "https://localhost/registration/v2/123/applications/42"
        );
    }

    #[test]
    fn test_channel_endpoint() {
        let e = endpoints();
        assert_eq!(
            e.channel("123", None),
            "https://localhost/notificationchannel/v2/123/channels"
        );
        assert_eq!(
            e.channel("123", Some("99")),
            "https://localhost/notificationchannel/v2/123/channels/99"
        );
        assert_eq!(
            e.channel_callback("123", "99"),
            "https://localhost/notificationchannel/v2/123/channels/99/callback"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_is_ignored() {
        let a = Endpoints::uniform("https://localhost/").unwrap();
        let b = Endpoints::uniform("https://localhost").unwrap();
        assert_eq!(a.application("1", None), b.application("1", None));
    }

    #[test]
    fn test_traffic_and_location_paths() {
        let e = endpoints();
        assert_eq!(
            e.device_summary("7"),
            "https://localhost/v1/7/systemReports/deviceSummary"
        );
        let device = DeviceId::new(DeviceIdType::Imsi, "123456789012345");
        assert_eq!(
            e.network_location("7", &device),
            "https://localhost/networkservices/v2/7/devices/IMSI/123456789012345/networkLocation"
        );
    }

    #[test]
    fn test_profile_roundtrip_uses_original_keys() {
        let dir = std::env::temp_dir().join(format!("aerisapi-profile-{}", std::process::id()));
        let path = dir.join("profile.json");

        let profile = Profile {
            account_id: Some("1".into()),
            api_key: Some("key".into()),
            email: Some("foo@bar.com".into()),
            primary_device_id_type: Some(DeviceIdType::Iccid),
            primary_device_id: Some("8918".into()),
            ..Default::default()
        };
        profile.save(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["accountId"], "1");
        assert_eq!(raw["primaryDeviceIdType"], "ICCID");
        assert!(raw.get("aerframeApplication").is_none());

        let loaded = Profile::load(&path).unwrap().unwrap();
        assert_eq!(loaded.require_primary_device().unwrap().value, "8918");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_profile_missing_file_is_none() {
        let path = std::env::temp_dir().join("aerisapi-definitely-not-here.json");
        assert!(Profile::load(&path).unwrap().is_none());
    }

    #[test]
    fn test_require_reports_missing_key() {
        let err = Profile::default().require_api_key().unwrap_err();
        assert!(err.to_string().contains("apiKey"));
    }
}
