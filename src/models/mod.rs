//! Aeris API model types and endpoint operations.

mod admin;
mod application;
mod channel;
mod location;
mod notification;
mod ping;
mod sms;
mod subscription;
mod traffic;

pub use admin::*;
pub use application::*;
pub use channel::*;
pub use location::*;
pub use notification::*;
pub use ping::*;
pub use sms::*;
pub use subscription::*;
pub use traffic::*;
