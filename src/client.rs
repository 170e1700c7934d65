//! Aeris API client.
//!
//! Low-level HTTP executor: one call per method, API key in the query
//! string, whole response read into an [`ApiResponse`]. Status
//! classification is left to the operation that issued the request.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use crate::config::Endpoints;
use crate::error::{AerisError, Result};
use crate::response::ApiResponse;

const USER_AGENT: &str = concat!("aerisapi/", env!("CARGO_PKG_VERSION"));

/// Low-level Aeris API client.
///
/// Holds the service endpoints and an HTTP connection pool. Credentials are
/// not stored here; every operation receives the account ID and API key it
/// should use, since AerFrame subscription calls authenticate with an
/// application's key rather than the account's.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use aerisapi::{AerisClient, Endpoints};
///
/// # fn example() -> aerisapi::Result<()> {
/// // Production endpoints, with AERIS_*_URL overrides
/// let client = AerisClient::from_env()?;
///
/// // Or point everything at one host
/// let client = AerisClient::new(Endpoints::uniform("http://127.0.0.1:8080")?)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AerisClient {
    http: Client,
    endpoints: Arc<Endpoints>,
}

impl std::fmt::Debug for AerisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AerisClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl AerisClient {
    /// Create a client using endpoints from the environment.
    ///
    /// See [`Endpoints::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(Endpoints::from_env()?)
    }

    /// Create a client for the given endpoints.
    ///
    /// No request timeout is configured; a call blocks until the server
    /// answers or the connection fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoints: Endpoints) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(AerisError::HttpError)?;

        Ok(Self {
            http,
            endpoints: Arc::new(endpoints),
        })
    }

    /// The service endpoints this client resolves URLs against.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET with only the API key as query parameter.
    #[tracing::instrument(skip(self, api_key))]
    pub async fn get(&self, url: &str, api_key: &str) -> Result<ApiResponse> {
        self.get_with_query(url, &[("apiKey", api_key)]).await
    }

    /// GET with arbitrary query parameters. The caller includes `apiKey`.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        url: &str,
        query: &Q,
    ) -> Result<ApiResponse> {
        Self::send(self.http.get(url).query(query)).await
    }

    /// GET without any credentials (reachability checks).
    #[tracing::instrument(skip(self))]
    pub async fn get_anonymous(&self, url: &str) -> Result<ApiResponse> {
        Self::send(self.http.get(url)).await
    }

    /// POST a JSON body, API key in the query string.
    #[tracing::instrument(skip(self, api_key, body))]
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: &str,
        body: &B,
    ) -> Result<ApiResponse> {
        Self::send(self.http.post(url).query(&[("apiKey", api_key)]).json(body)).await
    }

    /// DELETE, API key in the query string.
    #[tracing::instrument(skip(self, api_key))]
    pub async fn delete(&self, url: &str, api_key: &str) -> Result<ApiResponse> {
        Self::send(self.http.delete(url).query(&[("apiKey", api_key)])).await
    }

    async fn send(request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await.map_err(AerisError::HttpError)?;
        ApiResponse::read(response).await
    }
}
