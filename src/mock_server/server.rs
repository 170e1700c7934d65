//! Mock Aeris API server.
//!
//! Provides an axum-based HTTP server that simulates the AerAdmin,
//! AerTraffic and AerFrame APIs on one port.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::Fixtures;
use super::handlers;
use super::state::MockState;
use crate::config::Endpoints;
use crate::error::Result;

/// A mock Aeris API server for testing.
///
/// The server runs in the background and can be used to test the Aeris client
/// against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Fixtures::default_scenario().into_state()).await
    }

    /// Start a mock server with custom state.
    ///
    /// The state's `base_url` is overwritten with the bound address.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}", addr);

        state.base_url = url.clone();
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Endpoints pointing every service at this server.
    ///
    /// The long-poll base is `{url}/longpoll` so that it can be pinged apart
    /// from the AerTraffic root.
    pub fn endpoints(&self) -> Result<Endpoints> {
        let longpoll = format!("{}/longpoll", self.url);
        Endpoints::new(&self.url, &self.url, &self.url, &longpoll)
    }

    /// Get access to the server's shared state.
    ///
    /// This allows modifying the mock data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // AerAdmin routes
            .route("/AerAdmin_WS_5_0/rest/", get(handlers::aeradmin_root))
            .route(
                "/AerAdmin_WS_5_0/rest/devices/details",
                post(handlers::device_details),
            )
            .route(
                "/AerAdmin_WS_5_0/rest/devices/network/details",
                get(handlers::device_network_details),
            )
            // AerTraffic routes
            .route("/", get(handlers::aertraffic_root))
            .route(
                "/v1/:account/systemReports/deviceSummary",
                get(handlers::device_summary_report),
            )
            // Application routes
            .route(
                "/registration/v2/:account/applications",
                get(handlers::list_applications).post(handlers::create_application),
            )
            .route(
                "/registration/v2/:account/applications/:id",
                get(handlers::get_application).delete(handlers::delete_application),
            )
            // Channel routes
            .route(
                "/notificationchannel/v2/:account/channels",
                get(handlers::list_channels).post(handlers::create_channel),
            )
            .route(
                "/notificationchannel/v2/:account/channels/:id",
                get(handlers::get_channel).delete(handlers::delete_channel),
            )
            .route(
                "/notificationchannel/v2/:account/longpoll/:id",
                get(handlers::long_poll),
            )
            .route("/longpoll", get(handlers::longpoll_root))
            // SMS messaging routes
            .route(
                "/smsmessaging/v2/:account/inbound/subscriptions",
                get(handlers::list_inbound_subscriptions),
            )
            .route(
                "/smsmessaging/v2/:account/outbound/:app/subscriptions",
                get(handlers::list_outbound_subscriptions)
                    .post(handlers::create_outbound_subscription),
            )
            .route(
                "/smsmessaging/v2/:account/outbound/:app/subscriptions/:id",
                get(handlers::get_outbound_subscription)
                    .delete(handlers::delete_outbound_subscription),
            )
            .route(
                "/smsmessaging/v2/:account/outbound/:app/requests",
                post(handlers::send_sms),
            )
            // Network services routes
            .route(
                "/networkservices/v2/:account/devices/:type/:id/networkLocation",
                get(handlers::network_location),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::fixtures::{ACCOUNT_ID, API_KEY};
    use crate::{Account, AerisClient, Application, Create, List, NewApplication};

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        // Server should be accessible
        let client = reqwest::Client::new();
        let response = client
            .get(format!("{}/health", server.url()))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_create_and_list_applications_with_aeris_client() {
        let server = MockServer::start().await;
        let client = AerisClient::new(server.endpoints().unwrap()).unwrap();
        let account = Account::new(ACCOUNT_ID, API_KEY);

        let app = Application::create(&client, &account, NewApplication::new("demo"))
            .await
            .expect("Failed to create application");
        assert!(app.resource_url.starts_with(server.url()));
        assert!(app.api_key.is_some());

        let apps = Application::list(&client, &account)
            .await
            .expect("Failed to list applications");
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].application_short_name, "demo");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_router_long_poll_requires_known_key() {
        use axum::body::{to_bytes, Body};
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        let router = MockServer::create_router(MockState::new(ACCOUNT_ID, API_KEY).shared());
        let request = Request::get("/notificationchannel/v2/1/longpoll/ch?apiKey=bad")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).starts_with("Access Denied"));
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected() {
        let server = MockServer::start().await;
        let client = AerisClient::new(server.endpoints().unwrap()).unwrap();
        let account = Account::new(ACCOUNT_ID, "wrong-key");

        let err = Application::list(&client, &account).await.unwrap_err();
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.response().unwrap().body(), "");

        server.shutdown().await;
    }
}
