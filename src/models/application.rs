//! AerFrame application registration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::account::Account;
use crate::client::AerisClient;
use crate::error::Result;
use crate::resource_id::{self, APPLICATIONS};
use crate::traits::{Create, Delete, Get, List, Search};

/// Default description given to applications created by this crate.
pub const DEFAULT_APPLICATION_DESCRIPTION: &str = "Application for aerframe sdk";

/// A registered AerFrame application.
///
/// The application's ID is the suffix of `resource_url`; see
/// [`Application::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,

    pub application_short_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_tag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Key that subscription and SMS calls for this application use.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(rename = "resourceURL")]
    pub resource_url: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Application {
    /// The application ID, taken from `resourceURL`.
    pub fn id(&self) -> Option<&str> {
        resource_id::extract(&self.resource_url, APPLICATIONS)
    }
}

/// Parameters for registering an application.
///
/// The short name is also used as the application's name and tag.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub short_name: String,
    pub description: String,
}

impl NewApplication {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            description: DEFAULT_APPLICATION_DESCRIPTION.to_string(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateApplicationRequest<'a> {
    application_name: &'a str,
    description: &'a str,
    application_short_name: &'a str,
    application_tag: &'a str,
}

/// API response wrapper for listing applications.
#[derive(Debug, Deserialize)]
struct ApplicationListResponse {
    #[serde(default)]
    application: Vec<Application>,
}

#[async_trait]
impl Get for Application {
    type Scope = Account;
    type Output = Application;

    /// 200 returns the application. A 404 is not special-cased and raises
    /// like any other status; callers look the ID up with
    /// [`Search::find_id`] first.
    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn get(client: &AerisClient, account: &Account, app_id: &str) -> Result<Self> {
        let url = client.endpoints().application(&account.id, Some(app_id));
        client.get(&url, &account.api_key).await?.expect_json(200)
    }
}

#[async_trait]
impl List for Application {
    type Scope = Account;

    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn list(client: &AerisClient, account: &Account) -> Result<Vec<Self>> {
        let url = client.endpoints().application(&account.id, None);
        let data: ApplicationListResponse =
            client.get(&url, &account.api_key).await?.expect_json(200)?;
        Ok(data.application)
    }
}

#[async_trait]
impl Search for Application {
    type Scope = Account;

    /// Find an application by `applicationShortName`.
    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn find_id(
        client: &AerisClient,
        account: &Account,
        short_name: &str,
    ) -> Result<Option<String>> {
        let url = client.endpoints().application(&account.id, None);
        let response = client
            .get(&url, &account.api_key)
            .await?
            .expect_status(200)?;
        let data: ApplicationListResponse = response.json()?;

        let Some(app) = resource_id::last_match(&data.application, |a| {
            a.application_short_name == short_name
        }) else {
            tracing::info!("{short_name} application does not exist");
            return Ok(None);
        };

        match app.id() {
            Some(id) => {
                tracing::info!("{short_name} application exists. Application ID: {id}");
                Ok(Some(id.to_string()))
            }
            None => {
                let message = format!(
                    "application {short_name} has a resourceURL without '{APPLICATIONS}': {}",
                    app.resource_url
                );
                Err(response.into_error(message))
            }
        }
    }
}

#[async_trait]
impl Create for Application {
    type Scope = Account;
    type Params = NewApplication;

    /// POST the registration; success is 201 Created.
    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn create(
        client: &AerisClient,
        account: &Account,
        params: NewApplication,
    ) -> Result<Self> {
        let body = CreateApplicationRequest {
            application_name: &params.short_name,
            description: &params.description,
            application_short_name: &params.short_name,
            application_tag: &params.short_name,
        };

        let url = client.endpoints().application(&account.id, None);
        let app: Application = client
            .post(&url, &account.api_key, &body)
            .await?
            .expect_json(201)?;
        tracing::info!("Created application {}", params.short_name);
        Ok(app)
    }
}

#[async_trait]
impl Delete for Application {
    type Scope = Account;

    #[tracing::instrument(skip(client, account), fields(account_id = %account.id))]
    async fn delete(client: &AerisClient, account: &Account, app_id: &str) -> Result<bool> {
        let url = client.endpoints().application(&account.id, Some(app_id));
        let deleted = client.delete(&url, &account.api_key).await?.deletion()?;
        if deleted {
            tracing::info!("Application successfully deleted.");
        } else {
            tracing::info!("Application ID does not match current application.");
        }
        Ok(deleted)
    }
}
