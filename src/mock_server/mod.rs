//! Mock Aeris API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Aeris
//! APIs for integration and end-to-end testing. Unlike wiremock which mocks
//! at the HTTP level per-test, this server maintains state across requests,
//! enabling realistic workflow testing (provisioning, SMS delivery receipts,
//! teardown).
//!
//! # Example
//!
//! ```ignore
//! use aerisapi::mock_server::{MockServer, ACCOUNT_ID, API_KEY};
//! use aerisapi::{Account, AerisClient, Application, List};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = AerisClient::new(server.endpoints().unwrap()).unwrap();
//!     let account = Account::new(ACCOUNT_ID, API_KEY);
//!
//!     // Server starts without applications
//!     let apps = Application::list(&client, &account).await.unwrap();
//!     assert!(apps.is_empty());
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, ACCOUNT_ID, API_KEY, EMAIL};
pub use server::MockServer;
pub use state::{MockDevice, MockState};
