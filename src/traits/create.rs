//! Create trait for registering new resources.

use async_trait::async_trait;

use crate::client::AerisClient;
use crate::error::Result;

/// Create a resource and return it as the server describes it.
///
/// # Example
///
/// ```ignore
/// use aerisapi::{Account, AerisClient, Application, Create, NewApplication};
///
/// let client = AerisClient::from_env()?;
/// let account = Account::new("12345", "api-key");
/// let app = Application::create(&client, &account, NewApplication::new("x")).await?;
/// println!("created {}", app.resource_url);
/// ```
#[async_trait]
pub trait Create: Sized {
    /// What the resource is created under.
    type Scope: Sync;

    /// Creation parameters.
    type Params: Send;

    /// Create the resource.
    ///
    /// # Errors
    ///
    /// Returns an error unless the endpoint answers with its creation status.
    async fn create(client: &AerisClient, scope: &Self::Scope, params: Self::Params)
        -> Result<Self>;
}
