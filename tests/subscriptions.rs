//! Execution tests for inbound and outbound SMS subscriptions.

use aerisapi::{
    Account, AerisClient, AerisError, Create, Delete, Endpoints, Get, InboundSubscription,
    NewOutboundSubscription, OutboundSubscription, Search,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INBOUND_PATH: &str = "/smsmessaging/v2/1/inbound/subscriptions";
const OUTBOUND_PATH: &str = "/smsmessaging/v2/1/outbound/aerframesdk/subscriptions";

fn client(server: &MockServer) -> AerisClient {
    AerisClient::new(Endpoints::uniform(&server.uri()).unwrap()).unwrap()
}

fn account() -> Account {
    Account::new("1", "test-api-key")
}

fn outbound_json(base: &str, id: &str) -> serde_json::Value {
    serde_json::json!({
        "callbackReference": {
            "callbackData": "aerframesdk-mt",
            "notifyURL": format!("{base}/notificationchannel/v2/1/channels/ch/callback")
        },
        "filterCriteria": "SP:*",
        "destinationAddress": ["aerframesdk"],
        "resourceURL": format!("{base}{OUTBOUND_PATH}/{id}")
    })
}

#[tokio::test]
async fn test_inbound_find_id_by_destination_address() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(INBOUND_PATH))
        .and(query_param("apiKey", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscription": [
                {
                    "destinationAddress": ["some-other-app"],
                    "resourceURL": format!("{base}{INBOUND_PATH}/sub-1")
                },
                {
                    "destinationAddress": ["the-app"],
                    "resourceURL": format!("{base}{INBOUND_PATH}//sub-2")
                }
            ],
            "resourceURL": format!("{base}{INBOUND_PATH}/")
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let id = InboundSubscription::find_id(&client, &account(), "the-app")
        .await
        .unwrap();
    assert_eq!(id.as_deref(), Some("sub-2"));

    let none = InboundSubscription::find_id(&client, &account(), "not-there")
        .await
        .unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn test_outbound_find_id_without_receipt_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OUTBOUND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "resourceURL": format!("{}{OUTBOUND_PATH}", server.uri())
        })))
        .mount(&server)
        .await;

    let id = OutboundSubscription::find_id(&client(&server), &account(), "aerframesdk")
        .await
        .unwrap();
    assert!(id.is_none());
}

#[tokio::test]
async fn test_outbound_find_id_with_empty_receipt_array() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OUTBOUND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "deliveryReceiptSubscription": []
        })))
        .mount(&server)
        .await;

    let id = OutboundSubscription::find_id(&client(&server), &account(), "aerframesdk")
        .await
        .unwrap();
    assert!(id.is_none());
}

#[tokio::test]
async fn test_outbound_find_id_uses_first_entry() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path(OUTBOUND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "deliveryReceiptSubscription": [outbound_json(&base, "first"), outbound_json(&base, "second")]
        })))
        .mount(&server)
        .await;

    let id = OutboundSubscription::find_id(&client(&server), &account(), "aerframesdk")
        .await
        .unwrap();
    assert_eq!(id.as_deref(), Some("first"));
}

#[tokio::test]
async fn test_outbound_find_id_http_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(OUTBOUND_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = OutboundSubscription::find_id(&client(&server), &account(), "aerframesdk")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(401));
}

#[tokio::test]
async fn test_outbound_get_and_absent() {
    let server = MockServer::start().await;
    let body = outbound_json(&server.uri(), "sub");

    Mock::given(method("GET"))
        .and(path(format!("{OUTBOUND_PATH}/sub")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{OUTBOUND_PATH}/gone")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client(&server);
    let scope = account().app("aerframesdk");

    let subscription = OutboundSubscription::get(&client, &scope, "sub")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(serde_json::to_value(&subscription).unwrap(), body);
    assert_eq!(subscription.id(), Some("sub"));

    assert!(OutboundSubscription::get(&client, &scope, "gone")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_outbound_create_points_at_channel_callback() {
    let server = MockServer::start().await;
    let base = server.uri();
    let response = outbound_json(&base, "new");

    Mock::given(method("POST"))
        .and(path(OUTBOUND_PATH))
        .and(query_param("apiKey", "app-key"))
        .and(body_json(serde_json::json!({
            "callbackReference": {
                "callbackData": "aerframesdk-mt",
                "notifyURL": format!("{base}/notificationchannel/v2/1/channels/ch/callback")
            },
            "filterCriteria": "SP:*",
            "destinationAddress": ["aerframesdk"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let scope = Account::new("1", "app-key").app("aerframesdk");
    let subscription =
        OutboundSubscription::create(&client(&server), &scope, NewOutboundSubscription::new("ch"))
            .await
            .unwrap();

    assert_eq!(subscription.id(), Some("new"));
}

#[tokio::test]
async fn test_outbound_create_requires_channel() {
    let server = MockServer::start().await;

    let scope = account().app("aerframesdk");
    let err =
        OutboundSubscription::create(&client(&server), &scope, NewOutboundSubscription::new(""))
            .await
            .unwrap_err();

    assert!(matches!(err, AerisError::ConfigMissing(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_outbound_delete_status_mapping() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{OUTBOUND_PATH}/sub")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{OUTBOUND_PATH}/other")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{OUTBOUND_PATH}/bad")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server);
    let scope = account().app("aerframesdk");

    assert!(OutboundSubscription::delete(&client, &scope, "sub").await.unwrap());
    assert!(!OutboundSubscription::delete(&client, &scope, "other").await.unwrap());

    let err = OutboundSubscription::delete(&client, &scope, "bad")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
}

#[tokio::test]
async fn test_inbound_find_id_in_empty_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INBOUND_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscription": []
        })))
        .mount(&server)
        .await;

    let id = InboundSubscription::find_id(&client(&server), &account(), "aerframesdk")
        .await
        .unwrap();

    assert!(id.is_none());
}

#[tokio::test]
async fn test_outbound_delete_same_id_twice() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("{OUTBOUND_PATH}/already-gone")))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    let scope = account().app("aerframesdk");
    assert!(!OutboundSubscription::delete(&client, &scope, "already-gone").await.unwrap());
    assert!(!OutboundSubscription::delete(&client, &scope, "already-gone").await.unwrap());
}
