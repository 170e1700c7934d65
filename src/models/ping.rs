//! Reachability checks.
//!
//! Each service is checked with an unauthenticated GET. Without credentials
//! a live service answers with a known error status, which is what counts
//! as alive here.

use std::fmt;

use serde::Serialize;

use crate::client::AerisClient;
use crate::error::Result;

/// The endpoints that can be pinged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Service {
    AerAdmin,
    AerTraffic,
    AerFrame,
    AerFrameLongPoll,
}

impl Service {
    pub const ALL: [Service; 4] = [
        Service::AerAdmin,
        Service::AerTraffic,
        Service::AerFrame,
        Service::AerFrameLongPoll,
    ];

    /// Status a live endpoint answers an anonymous GET with.
    pub fn expected_status(&self) -> u16 {
        match self {
            Service::AerAdmin => 500,
            Service::AerTraffic => 200,
            Service::AerFrame => 401,
            Service::AerFrameLongPoll => 403,
        }
    }

    fn endpoint(&self, client: &AerisClient) -> String {
        let endpoints = client.endpoints();
        match self {
            Service::AerAdmin => endpoints.aeradmin_rest(),
            Service::AerTraffic => endpoints.aertraffic_base(),
            Service::AerFrame => endpoints.application("1", None),
            Service::AerFrameLongPoll => endpoints.longpoll_base(),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::AerAdmin => "AerAdmin",
            Service::AerTraffic => "AerTraffic",
            Service::AerFrame => "AerFrame API",
            Service::AerFrameLongPoll => "AerFrame Longpoll",
        };
        f.write_str(name)
    }
}

/// Result of pinging one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingReport {
    pub service: Service,
    pub endpoint: String,
    pub status: u16,
    pub alive: bool,
}

/// Ping one service.
///
/// An unexpected status is reported, not raised; only transport errors
/// propagate.
#[tracing::instrument(skip(client))]
pub async fn ping(client: &AerisClient, service: Service) -> Result<PingReport> {
    let endpoint = service.endpoint(client);
    let response = client.get_anonymous(&endpoint).await?;
    let status = response.status();
    let alive = status == service.expected_status();

    if alive {
        tracing::info!("Endpoint is alive: {endpoint}");
    } else {
        if status == 404 {
            tracing::warn!("Not expecting a 404 ...");
        }
        tracing::warn!(status, body = response.body(), "Unexpected response from {endpoint}");
    }

    Ok(PingReport {
        service,
        endpoint,
        status,
        alive,
    })
}

/// Ping every service in turn.
pub async fn ping_all(client: &AerisClient) -> Result<Vec<PingReport>> {
    let mut reports = Vec::with_capacity(Service::ALL.len());
    for service in Service::ALL {
        reports.push(ping(client, service).await?);
    }
    Ok(reports)
}
