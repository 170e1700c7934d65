//! Trait definitions for AerFrame resource operations.
//!
//! Each resource type implements the traits its endpoints support. The
//! implementations carry the per-endpoint status rules, so differences
//! between resources (which codes mean success, whether 404 means "absent")
//! stay visible in one place per resource.

mod create;
mod delete;
mod get;
mod list;
mod search;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use search::Search;
