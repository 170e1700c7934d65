//! Delete trait.

use async_trait::async_trait;

use crate::client::AerisClient;
use crate::error::Result;

/// Delete a resource by ID.
#[async_trait]
pub trait Delete {
    type Scope: Sync;

    /// Returns `true` when the resource was deleted (204) and `false` when
    /// it did not exist (404). Deleting twice therefore yields `false` the
    /// second time.
    ///
    /// # Errors
    ///
    /// Returns an error on any other status.
    async fn delete(client: &AerisClient, scope: &Self::Scope, id: &str) -> Result<bool>;
}
