//! AerFrame provisioning flows.
//!
//! `init` brings an account to the state SMS messaging needs: one
//! application, its long-poll channel and a delivery-receipt subscription
//! pointing at that channel. `reset` tears the same objects down. Both are
//! idempotent and neither rolls back on a partial failure.

use serde::Serialize;

use crate::account::Account;
use crate::client::AerisClient;
use crate::error::{AerisError, Result};
use crate::models::{
    get_device_details, Application, Channel, DeviceId, DeviceIdentifiers, NewApplication,
    NewChannel, NewOutboundSubscription, OutboundSubscription,
};
use crate::traits::{Create, Delete, Get, Search};

/// Short name of the application the command-line tool provisions.
pub const SDK_APP_SHORT_NAME: &str = "aerframesdk";

/// Everything `init` found or created.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provisioned {
    pub application: Application,
    pub channel: Channel,
    pub subscription: OutboundSubscription,
    pub device_identifiers: Option<DeviceIdentifiers>,
}

/// Which objects `reset` deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetReport {
    pub subscription: bool,
    pub channel: bool,
    pub application: bool,
}

fn app_api_key(application: &Application) -> Result<&str> {
    application.api_key.as_deref().ok_or_else(|| {
        AerisError::ConfigMissing(format!(
            "application {} has no apiKey",
            application.application_short_name
        ))
    })
}

fn required_id<'a>(id: Option<&'a str>, what: &str, resource_url: &str) -> Result<&'a str> {
    id.ok_or_else(|| {
        AerisError::ConfigMissing(format!("{what} resourceURL has no ID: {resource_url}"))
    })
}

async fn find_or_create_application(
    client: &AerisClient,
    account: &Account,
    short_name: &str,
) -> Result<Application> {
    match Application::find_id(client, account, short_name).await? {
        Some(id) => Application::get(client, account, &id).await,
        None => Application::create(client, account, NewApplication::new(short_name)).await,
    }
}

async fn find_or_create_channel(
    client: &AerisClient,
    account: &Account,
    application_tag: &str,
) -> Result<Channel> {
    if let Some(id) = Channel::find_id(client, account, application_tag).await? {
        if let Some(channel) = Channel::get(client, account, &id).await? {
            return Ok(channel);
        }
    }
    Channel::create(client, account, NewChannel::new(application_tag)).await
}

async fn find_or_create_subscription(
    client: &AerisClient,
    app_account: &Account,
    short_name: &str,
    channel: &Channel,
) -> Result<OutboundSubscription> {
    let scope = app_account.app(short_name);
    if let Some(id) = OutboundSubscription::find_id(client, app_account, short_name).await? {
        if let Some(subscription) = OutboundSubscription::get(client, &scope, &id).await? {
            return Ok(subscription);
        }
    }

    let channel_id = required_id(channel.id(), "channel", &channel.resource_url)?;
    OutboundSubscription::create(client, &scope, NewOutboundSubscription::new(channel_id)).await
}

/// Find or create the application, channel and outbound subscription named
/// `short_name`, then resolve the device's identifiers.
///
/// The subscription is managed with the application's own API key.
#[tracing::instrument(skip(client, account, email), fields(account_id = %account.id))]
pub async fn init(
    client: &AerisClient,
    account: &Account,
    email: &str,
    device: &DeviceId,
    short_name: &str,
) -> Result<Provisioned> {
    let application = find_or_create_application(client, account, short_name).await?;
    let channel = find_or_create_channel(client, account, short_name).await?;

    let app_account = Account::new(account.id.clone(), app_api_key(&application)?);
    let subscription =
        find_or_create_subscription(client, &app_account, short_name, &channel).await?;

    let details = get_device_details(client, account, email, device).await?;
    let device_identifiers = details.identifiers().cloned();

    Ok(Provisioned {
        application,
        channel,
        subscription,
        device_identifiers,
    })
}

/// Delete the subscription, channel and application named `short_name`, in
/// that order. Objects that do not exist are skipped.
#[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
pub async fn reset(
    client: &AerisClient,
    account: &Account,
    short_name: &str,
) -> Result<ResetReport> {
    let mut report = ResetReport::default();

    let Some(app_id) = Application::find_id(client, account, short_name).await? else {
        // Without the application there is no key to look up its
        // subscription with; a channel may still be left over.
        report.channel = delete_channel(client, account, short_name).await?;
        return Ok(report);
    };
    let application = Application::get(client, account, &app_id).await?;

    let app_account = Account::new(account.id.clone(), app_api_key(&application)?);
    if let Some(id) = OutboundSubscription::find_id(client, &app_account, short_name).await? {
        report.subscription =
            OutboundSubscription::delete(client, &app_account.app(short_name), &id).await?;
    }

    report.channel = delete_channel(client, account, short_name).await?;
    report.application = Application::delete(client, account, &app_id).await?;

    Ok(report)
}

async fn delete_channel(client: &AerisClient, account: &Account, tag: &str) -> Result<bool> {
    match Channel::find_id(client, account, tag).await? {
        Some(id) => Channel::delete(client, account, &id).await,
        None => Ok(false),
    }
}
