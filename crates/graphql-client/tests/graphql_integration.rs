//! Integration tests for the GraphQL client
//!
//! These tests use wiremock to stand up a mock GraphQL endpoint and exercise
//! the full request/response cycle and the error mapping.

use graphql_client::{
    Customer, ErrorKind, GetCustomers, GetOrders, GraphqlClient, GraphqlClientConfig, GraphqlError,
    GraphqlTransport, Order, QueryDefinition,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GraphqlClient {
    let config =
        GraphqlClientConfig::new(format!("{}/graphql", server.uri())).with_api_key("test-key");
    GraphqlClient::new(config).unwrap()
}

// =============================================================================
// Successful Request Tests
// =============================================================================

#[tokio::test]
async fn test_customers_query_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({ "operationName": "GetCustomers" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getCustomers": [
                    { "name": "Ana", "email": "a@x.com" },
                    { "name": "Bo", "email": "b@x.com" }
                ]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    #[derive(serde::Deserialize)]
    struct Data {
        #[serde(rename = "getCustomers")]
        get_customers: Vec<Customer>,
    }

    let data: Data = client.query(GetCustomers.request()).await.unwrap();
    let names: Vec<_> = data.get_customers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bo"]);
}

#[tokio::test]
async fn test_orders_query_through_transport() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "getOrders": [{
                    "Address": "1 Main St",
                    "City": "Springfield",
                    "Lat": 39.78,
                    "Lng": -89.65,
                    "carrier": "FedEx",
                    "createdAt": "2023-05-06T07:08:09Z",
                    "shippingCost": 4.5,
                    "trackingId": "FX-1"
                }]
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let data = client.execute(GetOrders.request()).await.unwrap();

    let orders: Vec<Order> = serde_json::from_value(data[GetOrders::ROOT_FIELD].clone()).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].tracking_id, "FX-1");
    assert_eq!(orders[0].carrier, "FedEx");
}

#[tokio::test]
async fn test_auth_and_default_headers_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "apikey test-key"))
        .and(header("x-client", "shell"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "getCustomers": [] } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = GraphqlClientConfig::new(mock_server.uri())
        .with_api_key("test-key")
        .with_header("X-Client", "shell");
    let client = GraphqlClient::new(config).unwrap();

    let data = client.execute(GetCustomers.request()).await.unwrap();
    assert_eq!(data["getCustomers"], json!([]));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[tokio::test]
async fn test_unauthorized_is_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).execute(GetCustomers.request()).await.unwrap_err();
    assert_eq!(err, GraphqlError::Auth { status: 401 });
    assert_eq!(err.kind(), ErrorKind::Auth);
}

#[tokio::test]
async fn test_server_error_is_network_kind() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down for maintenance"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).execute(GetOrders.request()).await.unwrap_err();
    match &err {
        GraphqlError::Http { status, body } => {
            assert_eq!(*status, 503);
            assert_eq!(body, "down for maintenance");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_graphql_errors_array() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Field \"getOrders\" is not defined", "path": ["getOrders"] }]
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).execute(GetOrders.request()).await.unwrap_err();
    assert_eq!(
        err,
        GraphqlError::Graphql(vec!["Field \"getOrders\" is not defined".to_string()])
    );
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[tokio::test]
async fn test_non_json_body_is_schema_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).execute(GetOrders.request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "data": { "getOrders": [] } })),
        )
        .mount(&mock_server)
        .await;

    let config =
        GraphqlClientConfig::new(mock_server.uri()).with_timeout(Duration::from_millis(50));
    let client = GraphqlClient::new(config).unwrap();

    let err = client.execute(GetOrders.request()).await.unwrap_err();
    assert!(matches!(err, GraphqlError::Network(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1
    let config = GraphqlClientConfig::new("http://127.0.0.1:1/graphql")
        .with_timeout(Duration::from_secs(2));
    let client = GraphqlClient::new(config).unwrap();
    let err = client.execute(GetCustomers.request()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}
