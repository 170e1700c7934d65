//! Execution tests for the AerTraffic report and the reachability checks.

use aerisapi::{
    get_device_summary_report, ping, ping_all, Account, AerisClient, Endpoints, Service,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SUMMARY_PATH: &str = "/v1/1/systemReports/deviceSummary";

/// Each service gets its own path prefix so the roots do not collide.
fn split_client(server: &MockServer) -> AerisClient {
    let base = server.uri();
    let endpoints = Endpoints::new(
        &format!("{base}/admin"),
        &format!("{base}/traffic"),
        &format!("{base}/frame"),
        &format!("{base}/longpoll"),
    )
    .unwrap();
    AerisClient::new(endpoints).unwrap()
}

#[tokio::test]
async fn test_device_summary_report_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .and(query_param("apiKey", "test-api-key"))
        .and(query_param("durationInMonths", "3"))
        .and(query_param("subAccounts", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"devices\": 12}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = AerisClient::new(Endpoints::uniform(&server.uri()).unwrap()).unwrap();
    let report = get_device_summary_report(&client, &Account::new("1", "test-api-key"))
        .await
        .unwrap();

    assert_eq!(report.status(), 200);
    assert_eq!(report.body(), "{\"devices\": 12}");
}

#[tokio::test]
async fn test_device_summary_report_never_raises_on_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = AerisClient::new(Endpoints::uniform(&server.uri()).unwrap()).unwrap();
    let report = get_device_summary_report(&client, &Account::new("1", "bad"))
        .await
        .unwrap();

    assert_eq!(report.status(), 403);
    assert_eq!(report.body(), "forbidden");
}

#[tokio::test]
async fn test_ping_all_alive() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/AerAdmin_WS_5_0/rest/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/traffic/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/frame/registration/v2/1/applications"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/longpoll"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let reports = ping_all(&split_client(&server)).await.unwrap();

    let services: Vec<_> = reports.iter().map(|r| r.service).collect();
    assert_eq!(services, Service::ALL);
    assert!(reports.iter().all(|r| r.alive), "{reports:?}");
}

#[tokio::test]
async fn test_ping_sends_no_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/frame/registration/v2/1/applications"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    ping(&split_client(&server), Service::AerFrame).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_ping_unexpected_status_is_reported() {
    let server = MockServer::start().await;

    // Nothing mounted: wiremock answers 404 everywhere.
    let report = ping(&split_client(&server), Service::AerAdmin).await.unwrap();

    assert_eq!(report.status, 404);
    assert!(!report.alive);
    assert!(report.endpoint.ends_with("/admin/AerAdmin_WS_5_0/rest/"));
}
