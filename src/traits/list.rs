//! List trait for fetching collections.

use async_trait::async_trait;

use crate::client::AerisClient;
use crate::error::Result;

/// Fetch every resource of a kind. AerFrame collections are not paginated.
#[async_trait]
pub trait List: Sized + Send {
    /// What the collection is addressed under.
    type Scope: Sync;

    /// List the collection.
    ///
    /// # Errors
    ///
    /// Returns an error on any status other than 200.
    async fn list(client: &AerisClient, scope: &Self::Scope) -> Result<Vec<Self>>;
}
