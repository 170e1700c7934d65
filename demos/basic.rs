//! Basic example of the Aeris API client.
//!
//! Run with:
//! ```
//! AERIS_ACCOUNT_ID=12345 AERIS_API_KEY=your-key AERIS_EMAIL=me@example.com \
//!     AERIS_DEVICE_ID=8914800000000000000 cargo run --example basic
//! ```

use aerisapi::{
    get_device_details, Account, AerisClient, AerisError, Application, DeviceId, DeviceIdType,
    Get, Search,
};

fn required(name: &str) -> aerisapi::Result<String> {
    std::env::var(name).map_err(|_| AerisError::ConfigMissing(name.to_string()))
}

#[tokio::main]
async fn main() -> aerisapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Production endpoints unless AERIS_*_URL overrides are set
    println!("Creating Aeris client...");
    let client = AerisClient::from_env()?;
    let account = Account::new(required("AERIS_ACCOUNT_ID")?, required("AERIS_API_KEY")?);

    println!("\n--- Looking up the SDK application ---");
    match Application::find_id(&client, &account, "aerframesdk").await? {
        Some(id) => {
            let app = Application::get(&client, &account, &id).await?;
            println!("Application: {}", app.application_short_name);
            println!("  ID: {id}");
            println!("  Tag: {}", app.application_tag.as_deref().unwrap_or("none"));
        }
        None => println!("No application named aerframesdk"),
    }

    println!("\n--- Device Details ---");
    let device = DeviceId::new(DeviceIdType::Iccid, required("AERIS_DEVICE_ID")?);
    let details = get_device_details(&client, &account, &required("AERIS_EMAIL")?, &device).await?;
    match details.identifiers() {
        Some(ids) => {
            println!("  ICCID: {}", ids.iccid.as_deref().unwrap_or("unknown"));
            println!("  IMSI: {}", ids.imsi.as_deref().unwrap_or("unknown"));
            println!("  MSISDN: {}", ids.msisdn.as_deref().unwrap_or("unknown"));
        }
        None => println!("  No device attributes returned"),
    }

    Ok(())
}
