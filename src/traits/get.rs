//! Get trait for fetching single resources.

use async_trait::async_trait;

use crate::client::AerisClient;
use crate::error::Result;

/// Fetch a single resource by ID.
///
/// `Output` is `Self` when the endpoint treats a missing resource as an
/// error, and `Option<Self>` when it reports absence as a 404 the caller is
/// expected to handle.
///
/// # Example
///
/// ```ignore
/// use aerisapi::{Account, AerisClient, Channel, Get};
///
/// let client = AerisClient::from_env()?;
/// let account = Account::new("12345", "api-key");
/// if let Some(channel) = Channel::get(&client, &account, "channel-id").await? {
///     println!("{:?}", channel.channel_url());
/// }
/// ```
#[async_trait]
pub trait Get: Sized {
    /// What the resource is addressed under.
    type Scope: Sync;

    /// `Self` or `Option<Self>`.
    type Output;

    /// Fetch the resource.
    ///
    /// # Errors
    ///
    /// Returns [`AerisError::Api`](crate::AerisError::Api) on any status the
    /// endpoint does not accept.
    async fn get(client: &AerisClient, scope: &Self::Scope, id: &str) -> Result<Self::Output>;
}
