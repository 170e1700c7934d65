//! Execution tests for AerFrame notification channels.
//!
//! Channel lookups treat 404 as "absent" and creation answers 200.

use aerisapi::{Account, AerisClient, Channel, Create, Delete, Endpoints, Get, NewChannel, Search};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHANNELS_PATH: &str = "/notificationchannel/v2/1/channels";

fn client(server: &MockServer) -> AerisClient {
    AerisClient::new(Endpoints::uniform(&server.uri()).unwrap()).unwrap()
}

fn account() -> Account {
    Account::new("1", "test-api-key")
}

fn channel_json(base: &str, tag: &str, id: &str) -> serde_json::Value {
    serde_json::json!({
        "applicationTag": tag,
        "channelType": "LongPolling",
        "channelData": {
            "channelURL": format!("{base}/notificationchannel/v2/1/longpoll/{id}"),
            "maxNotifications": 15
        },
        "callbackURL": format!("{base}{CHANNELS_PATH}/{id}/callback"),
        "resourceURL": format!("{base}{CHANNELS_PATH}/{id}")
    })
}

#[tokio::test]
async fn test_find_id_by_application_tag() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(CHANNELS_PATH))
        .and(query_param("apiKey", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "notificationChannel": [
                channel_json(&base, "aerframesdk", "13245678-1234-1234-1234-123456789abc"),
                channel_json(&base, "anything else", "87654321-4321-4321-4321-cba987654321"),
            ],
            "resourceURL": format!("{base}{CHANNELS_PATH}")
        })))
        .mount(&server)
        .await;

    let id = Channel::find_id(&client(&server), &account(), "aerframesdk")
        .await
        .unwrap();

    assert_eq!(id.as_deref(), Some("13245678-1234-1234-1234-123456789abc"));
}

#[tokio::test]
async fn test_find_id_not_found() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(CHANNELS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "notificationChannel": [channel_json(&base, "aerframesdk-foil", "x")]
        })))
        .mount(&server)
        .await;

    let id = Channel::find_id(&client(&server), &account(), "aerframesdk")
        .await
        .unwrap();

    assert!(id.is_none());
}

#[tokio::test]
async fn test_get_and_absent() {
    let server = MockServer::start().await;
    let body = channel_json(&server.uri(), "aerframe", "abc");

    Mock::given(method("GET"))
        .and(path(format!("{CHANNELS_PATH}/abc")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{CHANNELS_PATH}/missing")))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({"link": []})))
        .mount(&server)
        .await;

    let client = client(&server);
    let channel = Channel::get(&client, &account(), "abc").await.unwrap().unwrap();
    assert_eq!(serde_json::to_value(&channel).unwrap(), body);

    assert!(Channel::get(&client, &account(), "missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_get_http_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{CHANNELS_PATH}/abc")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = Channel::get(&client(&server), &account(), "abc")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_create_long_polling_channel() {
    let server = MockServer::start().await;
    let response = channel_json(&server.uri(), "aerframesdk", "new");

    Mock::given(method("POST"))
        .and(path(CHANNELS_PATH))
        .and(query_param("apiKey", "test-api-key"))
        .and(body_json(serde_json::json!({
            "applicationTag": "aerframesdk",
            "channelData": {"maxNotifications": "15", "type": "nc:LongPollingData"},
            "channelType": "LongPolling"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let channel = Channel::create(&client(&server), &account(), NewChannel::new("aerframesdk"))
        .await
        .unwrap();

    assert_eq!(channel.id(), Some("new"));
}

#[tokio::test]
async fn test_create_http_401() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(CHANNELS_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = Channel::create(&client(&server), &account(), NewChannel::new("aerframesdk"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_delete_status_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{CHANNELS_PATH}/a")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{CHANNELS_PATH}/b")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(Channel::delete(&client, &account(), "a").await.unwrap());
    assert!(!Channel::delete(&client, &account(), "b").await.unwrap());
}

#[tokio::test]
async fn test_find_id_in_empty_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CHANNELS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "notificationChannel": []
        })))
        .mount(&server)
        .await;

    let id = Channel::find_id(&client(&server), &account(), "aerframesdk")
        .await
        .unwrap();

    assert!(id.is_none());
}

#[tokio::test]
async fn test_delete_same_id_twice() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{CHANNELS_PATH}/already-gone")))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(!Channel::delete(&client, &account(), "already-gone").await.unwrap());
    assert!(!Channel::delete(&client, &account(), "already-gone").await.unwrap());
}
