//! Search trait for resolving a resource ID from a listing.

use async_trait::async_trait;

use crate::client::AerisClient;
use crate::error::Result;

/// Find a resource's ID by a human-chosen key (short name or tag).
///
/// The collection is listed and scanned; the ID is taken from the matching
/// entry's `resourceURL`. When several entries match, the last one listed
/// wins.
#[async_trait]
pub trait Search {
    type Scope: Sync;

    /// Returns `None` when nothing matches, including an empty listing.
    ///
    /// # Errors
    ///
    /// Returns an error on any status other than 200, or when the matching
    /// entry's `resourceURL` does not contain the expected path segment.
    async fn find_id(client: &AerisClient, scope: &Self::Scope, key: &str)
        -> Result<Option<String>>;
}
