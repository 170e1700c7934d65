//! Aeris API CLI binary.
//!
//! A command-line interface for the Aeris AerAdmin, AerTraffic and AerFrame
//! APIs. Credentials and the provisioned AerFrame objects are kept in a JSON
//! profile between runs.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use aerisapi::cli::{
    AerAdminCommand, AerFrameCommand, AerTrafficCommand, ApplicationCommand, ChannelCommand, Cli,
    Command, ConfigArgs, NetworkCommand, SmsCommand, SubscriptionCommand,
};
use aerisapi::output::PrettyPrint;
use aerisapi::workflow::{self, SDK_APP_SHORT_NAME};
use aerisapi::{
    get_device_details, get_device_network_details, get_device_summary_report, get_location,
    notifications_flush_search, ping_all, send_mt_sms, Account, AerisClient, AerisError,
    Application, Channel, Create, Delete, Get, InboundSubscription, List, NewApplication,
    NewChannel, NewOutboundSubscription, OutboundSubscription, Profile, Search, TokioPause,
};
use clap::Parser;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let client = match AerisClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: check the AERIS_*_URL environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let Some(response) = e.response() {
                if !response.body().is_empty() {
                    eprintln!("{}", response.pretty_body());
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn profile_path(cli: &Cli) -> aerisapi::Result<PathBuf> {
    match cli.config_file {
        Some(ref path) => Ok(path.clone()),
        None => Profile::default_path().ok_or_else(|| {
            AerisError::ConfigMissing("cannot determine home directory; use --config-file".into())
        }),
    }
}

fn load_profile(path: &Path) -> aerisapi::Result<Profile> {
    Profile::load(path)?.ok_or_else(|| {
        AerisError::ConfigMissing(format!(
            "no valid configuration at {}; try running the config command",
            path.display()
        ))
    })
}

fn account(profile: &Profile) -> aerisapi::Result<Account> {
    Ok(Account::new(
        profile.require_account_id()?,
        profile.require_api_key()?,
    ))
}

/// The account ID paired with the SDK application's own key.
fn app_account(profile: &Profile) -> aerisapi::Result<Account> {
    let application = profile.require_application()?;
    let key = application.api_key.as_deref().ok_or_else(|| {
        AerisError::ConfigMissing("stored application has no apiKey; run 'aerframe init'".into())
    })?;
    Ok(Account::new(profile.require_account_id()?, key))
}

async fn run(client: &AerisClient, cli: Cli) -> aerisapi::Result<()> {
    let path = profile_path(&cli)?;
    let json = cli.json;

    match cli.command {
        Command::Ping => {
            let reports = ping_all(client).await?;
            if json {
                output_json(&reports)?;
            } else {
                println!("Checking all api endpoints ...");
                for report in &reports {
                    println!("{}", report.pretty_print());
                }
            }
            Ok(())
        }
        Command::Config(args) => handle_config(&path, args, json),
        Command::Aeradmin(command) => {
            let profile = load_profile(&path)?;
            handle_aeradmin(client, &profile, command, json).await
        }
        Command::Aertraffic(AerTrafficCommand::DeviceSummaryReport) => {
            let profile = load_profile(&path)?;
            let response = get_device_summary_report(client, &account(&profile)?).await?;
            println!("Response code: {}", response.status());
            println!("{}", response.pretty_body());
            Ok(())
        }
        Command::Aerframe(command) => {
            let mut profile = load_profile(&path)?;
            handle_aerframe(client, &path, &mut profile, command, json).await
        }
    }
}

fn handle_config(path: &Path, args: ConfigArgs, json: bool) -> aerisapi::Result<()> {
    let mut profile = Profile::load(path)?.unwrap_or_default();

    if let Some(account_id) = args.account_id {
        profile.account_id = Some(account_id);
    }
    if let Some(api_key) = args.api_key {
        profile.api_key = Some(api_key);
    }
    if let Some(email) = args.email {
        profile.email = Some(email);
    }
    if let Some(id_type) = args.device_id_type {
        profile.primary_device_id_type = Some(id_type);
    }
    if let Some(device_id) = args.device_id {
        profile.primary_device_id = Some(device_id);
    }

    // Validate before writing so a half-filled profile is never saved.
    profile.require_account_id()?;
    profile.require_api_key()?;
    profile.require_email()?;
    profile.require_primary_device()?;

    profile.save(path)?;
    if json {
        output_json(&profile)?;
    } else {
        println!("Configuration written to {}", path.display());
    }
    Ok(())
}

async fn handle_aeradmin(
    client: &AerisClient,
    profile: &Profile,
    command: AerAdminCommand,
    json: bool,
) -> aerisapi::Result<()> {
    let account = account(profile)?;
    let email = profile.require_email()?;
    let device = profile.require_primary_device()?;

    match command {
        AerAdminCommand::Device => {
            let details = get_device_details(client, &account, email, &device).await?;
            output_single(&details, json)
        }
        AerAdminCommand::Network => {
            let details = get_device_network_details(client, &account, email, &device).await?;
            output_single(&details, json)
        }
    }
}

async fn handle_aerframe(
    client: &AerisClient,
    path: &Path,
    profile: &mut Profile,
    command: AerFrameCommand,
    json: bool,
) -> aerisapi::Result<()> {
    let account = account(profile)?;

    match command {
        AerFrameCommand::Init => {
            let email = profile.require_email()?;
            let device = profile.require_primary_device()?;
            let provisioned =
                workflow::init(client, &account, email, &device, SDK_APP_SHORT_NAME).await?;

            profile.aerframe_application = Some(provisioned.application.clone());
            profile.aerframe_channel = Some(provisioned.channel.clone());
            profile.aerframe_subscription = Some(provisioned.subscription.clone());
            profile.device_id = provisioned.device_identifiers.clone();
            profile.save(path)?;

            output_single(&provisioned, json)
        }
        AerFrameCommand::Reset => {
            let report = workflow::reset(client, &account, SDK_APP_SHORT_NAME).await?;

            profile.aerframe_application = None;
            profile.aerframe_channel = None;
            profile.aerframe_subscription = None;
            profile.save(path)?;

            output_single(&report, json)
        }
        AerFrameCommand::Application(command) => {
            handle_application(client, &account, command, json).await
        }
        AerFrameCommand::Channel(command) => {
            handle_channel(client, &account, command, json).await
        }
        AerFrameCommand::Subscription(command) => {
            handle_subscription(client, profile, command, json).await
        }
        AerFrameCommand::Sms(SmsCommand::Send { message }) => {
            let app_account = app_account(profile)?;
            let imsi = profile
                .require_device_identifiers()?
                .imsi
                .as_deref()
                .ok_or_else(|| AerisError::ConfigMissing("device has no IMSI".into()))?;

            let scope = app_account.app(SDK_APP_SHORT_NAME);
            match send_mt_sms(client, &scope, imsi, &message).await? {
                Some(sent) => output_single(&sent, json),
                None => {
                    eprintln!("IMSI is not found or does not support SMS.");
                    Ok(())
                }
            }
        }
        AerFrameCommand::Sms(SmsCommand::Receive { num, interval }) => {
            let app_account = app_account(profile)?;
            let channel_url = profile.require_channel()?.channel_url().ok_or_else(|| {
                AerisError::ConfigMissing("stored channel has no channelURL".into())
            })?;

            let report = notifications_flush_search(
                client,
                &app_account.api_key,
                channel_url,
                num,
                Duration::from_secs(interval),
                &TokioPause,
            )
            .await?;
            output_single(&report, json)
        }
        AerFrameCommand::Network(NetworkCommand::Location) => {
            let app_account = app_account(profile)?;
            let device = profile.require_primary_device()?;
            let location = get_location(client, &app_account, &device).await?;
            output_single(&location, json)
        }
    }
}

async fn handle_application(
    client: &AerisClient,
    account: &Account,
    command: ApplicationCommand,
    json: bool,
) -> aerisapi::Result<()> {
    match command {
        ApplicationCommand::List => {
            let apps = Application::list(client, account).await?;
            if json {
                output_json(&apps)?;
            } else {
                let rows: Vec<ApplicationRow> = apps.iter().map(ApplicationRow::from).collect();
                println!("{}", Table::new(rows));
            }
            Ok(())
        }
        ApplicationCommand::Get(app) => {
            match Application::find_id(client, account, &app.short_name).await? {
                Some(id) => {
                    let application = Application::get(client, account, &id).await?;
                    output_single(&application, json)
                }
                None => not_found(&format!("application {}", app.short_name)),
            }
        }
        ApplicationCommand::Create(app) => {
            let application =
                Application::create(client, account, NewApplication::new(app.short_name)).await?;
            output_single(&application, json)
        }
        ApplicationCommand::Delete(app) => {
            let Some(id) = Application::find_id(client, account, &app.short_name).await? else {
                return not_found(&format!("application {}", app.short_name));
            };
            let deleted = Application::delete(client, account, &id).await?;
            report_deletion(&format!("application {}", app.short_name), deleted);
            Ok(())
        }
    }
}

async fn handle_channel(
    client: &AerisClient,
    account: &Account,
    command: ChannelCommand,
    json: bool,
) -> aerisapi::Result<()> {
    match command {
        ChannelCommand::Get => {
            let Some(id) = Channel::find_id(client, account, SDK_APP_SHORT_NAME).await? else {
                return not_found("sdk channel");
            };
            match Channel::get(client, account, &id).await? {
                Some(channel) => output_single(&channel, json),
                None => not_found("sdk channel"),
            }
        }
        ChannelCommand::Create => {
            let channel =
                Channel::create(client, account, NewChannel::new(SDK_APP_SHORT_NAME)).await?;
            output_single(&channel, json)
        }
        ChannelCommand::Delete => {
            let Some(id) = Channel::find_id(client, account, SDK_APP_SHORT_NAME).await? else {
                return not_found("sdk channel");
            };
            let deleted = Channel::delete(client, account, &id).await?;
            report_deletion("sdk channel", deleted);
            Ok(())
        }
    }
}

async fn handle_subscription(
    client: &AerisClient,
    profile: &Profile,
    command: SubscriptionCommand,
    json: bool,
) -> aerisapi::Result<()> {
    let app_account = app_account(profile)?;
    let scope = app_account.app(SDK_APP_SHORT_NAME);

    match command {
        SubscriptionCommand::Get => {
            let inbound = InboundSubscription::list(client, &account(profile)?).await?;
            let outbound =
                match OutboundSubscription::find_id(client, &app_account, SDK_APP_SHORT_NAME)
                    .await?
                {
                    Some(id) => OutboundSubscription::get(client, &scope, &id).await?,
                    None => None,
                };

            if json {
                return output_json(&serde_json::json!({
                    "inbound": inbound,
                    "outbound": outbound,
                }));
            }

            if inbound.is_empty() {
                eprintln!("No inbound subscriptions found");
            }
            for subscription in &inbound {
                println!("{}\n", subscription.pretty_print());
            }
            match outbound {
                Some(subscription) => output_single(&subscription, false),
                None => not_found("sdk subscription"),
            }
        }
        SubscriptionCommand::Create => {
            let account = account(profile)?;
            let Some(channel_id) = Channel::find_id(client, &account, SDK_APP_SHORT_NAME).await?
            else {
                return not_found("sdk channel");
            };
            let subscription = OutboundSubscription::create(
                client,
                &scope,
                NewOutboundSubscription::new(channel_id),
            )
            .await?;
            output_single(&subscription, json)
        }
        SubscriptionCommand::Delete => {
            let Some(id) =
                OutboundSubscription::find_id(client, &app_account, SDK_APP_SHORT_NAME).await?
            else {
                return not_found("sdk subscription");
            };
            let deleted = OutboundSubscription::delete(client, &scope, &id).await?;
            report_deletion("sdk subscription", deleted);
            Ok(())
        }
    }
}

fn not_found(what: &str) -> aerisapi::Result<()> {
    eprintln!("No {what} found");
    Ok(())
}

fn report_deletion(what: &str, deleted: bool) {
    if deleted {
        println!("Deleted {what}");
    } else {
        eprintln!("{what} was already gone");
    }
}

fn output_json<T: Serialize + ?Sized>(item: &T) -> aerisapi::Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> aerisapi::Result<()> {
    if json {
        output_json(item)
    } else {
        println!("{}", item.pretty_print());
        Ok(())
    }
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ApplicationRow {
    #[tabled(rename = "short name")]
    short_name: String,
    id: String,
    tag: String,
    description: String,
}

impl From<&Application> for ApplicationRow {
    fn from(a: &Application) -> Self {
        Self {
            short_name: a.application_short_name.clone(),
            id: a.id().unwrap_or_default().to_string(),
            tag: a.application_tag.clone().unwrap_or_default(),
            description: a.description.clone().unwrap_or_default(),
        }
    }
}
