//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the aerisapi binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::DeviceIdType;
use crate::workflow::SDK_APP_SHORT_NAME;

/// Aeris IoT services command-line interface.
#[derive(Parser, Debug)]
#[command(name = "aerisapi", about = "Aeris AerAdmin, AerTraffic and AerFrame CLI", version)]
pub struct Cli {
    /// Verbose output.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Path to the profile file (defaults to ~/.aeris_config).
    #[arg(long, global = true, env = "AERIS_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that every API endpoint is reachable.
    Ping,

    /// Write the profile used by the other commands.
    Config(ConfigArgs),

    /// AerAdmin device administration.
    #[command(subcommand)]
    Aeradmin(AerAdminCommand),

    /// AerTraffic reports.
    #[command(subcommand)]
    Aertraffic(AerTrafficCommand),

    /// AerFrame applications, channels, subscriptions and SMS.
    #[command(subcommand)]
    Aerframe(AerFrameCommand),
}

/// Profile values; each falls back to its `AERIS_*` variable, then to the
/// value already stored.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Customer account ID.
    #[arg(long, env = "AERIS_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// Customer API key.
    #[arg(long, env = "AERIS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// User email address.
    #[arg(long, env = "AERIS_EMAIL")]
    pub email: Option<String>,

    /// Device identifier type (ICCID, IMSI, ...).
    #[arg(long, env = "AERIS_DEVICE_ID_TYPE")]
    pub device_id_type: Option<DeviceIdType>,

    /// Device ID.
    #[arg(long, env = "AERIS_DEVICE_ID")]
    pub device_id: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AerAdminCommand {
    /// Get device details.
    Device,
    /// Get device network details.
    Network,
}

#[derive(Subcommand, Debug)]
pub enum AerTrafficCommand {
    /// Print the device summary report.
    DeviceSummaryReport,
}

#[derive(Subcommand, Debug)]
pub enum AerFrameCommand {
    /// Create (or find) the application, notification channel and subscription.
    Init,

    /// Delete the application, notification channel and subscription.
    Reset,

    /// Application commands.
    #[command(subcommand)]
    Application(ApplicationCommand),

    /// Notification channel commands.
    #[command(subcommand)]
    Channel(ChannelCommand),

    /// Outbound subscription commands.
    #[command(subcommand)]
    Subscription(SubscriptionCommand),

    /// SMS commands.
    #[command(subcommand)]
    Sms(SmsCommand),

    /// Network services.
    #[command(subcommand)]
    Network(NetworkCommand),
}

/// Application short name, shared by the application subcommands.
#[derive(Args, Debug, Clone)]
pub struct AppShortName {
    /// Application short name.
    #[arg(long = "aps", default_value = SDK_APP_SHORT_NAME)]
    pub short_name: String,
}

#[derive(Subcommand, Debug)]
pub enum ApplicationCommand {
    /// List all applications.
    List,
    /// Get an application by short name.
    Get(AppShortName),
    /// Create an application.
    Create(AppShortName),
    /// Delete an application.
    Delete(AppShortName),
}

#[derive(Subcommand, Debug)]
pub enum ChannelCommand {
    /// Get the SDK notification channel.
    Get,
    /// Create the SDK notification channel.
    Create,
    /// Delete the SDK notification channel.
    Delete,
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionCommand {
    /// List inbound subscriptions and get the SDK outbound subscription.
    Get,
    /// Create the SDK outbound subscription.
    Create,
    /// Delete the SDK outbound subscription.
    Delete,
}

#[derive(Subcommand, Debug)]
pub enum SmsCommand {
    /// Send an SMS to the configured device.
    Send {
        /// Message text.
        #[arg(long, default_value = "Test from aerframesdk.")]
        message: String,
    },
    /// Receive SMS or delivery receipts.
    Receive {
        /// Number of receive requests.
        #[arg(long, default_value = "1")]
        num: usize,

        /// Seconds to wait between requests.
        #[arg(long, default_value = "0")]
        interval: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum NetworkCommand {
    /// Get the network location of the configured device.
    Location,
}
