//! Integration tests for the HTTP transport.
//!
//! These tests verify request building, the bearer token, response parsing
//! and the information a transport failure exposes.

use std::collections::HashMap;

use bling_api::clients::{HttpClient, HttpError, HttpMethod, HttpRequest};
use bling_api::{AccessToken, BaseUrl, BlingConfig, InvalidHttpRequestError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = BlingConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .base_url(BaseUrl::new(format!("{}/Api/v3", server.uri())).unwrap())
        .build()
        .unwrap();
    HttpClient::new(&config)
}

// ============================================================================
// Requests
// ============================================================================

#[test]
fn test_request_builder_collects_query_and_headers() {
    let request = HttpRequest::builder(HttpMethod::Get, "contatos")
        .query_param("pagina", "1")
        .header("X-Trace", "t-1")
        .build()
        .unwrap();

    assert_eq!(request.http_method, HttpMethod::Get);
    assert_eq!(request.path, "contatos");
    assert_eq!(
        request.query.as_ref().and_then(|q| q.get("pagina")),
        Some(&"1".to_string())
    );
    assert!(request.extra_headers.is_some());
}

#[test]
fn test_body_on_get_is_rejected() {
    let result = HttpRequest::builder(HttpMethod::Get, "contatos")
        .body(json!({"nome": "x"}))
        .build();

    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::UnexpectedBody { .. })
    ));
}

#[tokio::test]
async fn test_every_request_carries_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Api/v3/contatos"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.get("contatos", None, None).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.body, json!({"data": []}));
}

#[tokio::test]
async fn test_put_sends_body_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/Api/v3/produtos/3"))
        .and(query_param("lojaId", "8"))
        .and(body_json(json!({"nome": "Copo"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 3}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut query = HashMap::new();
    query.insert("lojaId".to_string(), "8".to_string());

    let response = client
        .put("produtos/3", Some(json!({"nome": "Copo"})), Some(query), None)
        .await
        .unwrap();

    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_leading_slash_in_path_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/Api/v3/contatos/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.delete("/contatos/5", None, None).await.unwrap();

    assert_eq!(response.code, 204);
    assert!(response.body.is_null());
}

// ============================================================================
// Responses
// ============================================================================

#[tokio::test]
async fn test_response_headers_are_exposed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "r-1")
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.get("contatos", None, None).await.unwrap();

    assert_eq!(response.header("x-request-id"), Some("r-1"));
    assert_eq!(response.headers_as_json()["x-request-id"], json!("r-1"));
}

#[tokio::test]
async fn test_non_json_success_body_is_kept_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client.get("status", None, None).await.unwrap();

    assert_eq!(response.body, json!("OK"));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_error_response_exposes_payload_and_request() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": {"message": "invalid"}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .patch("pedidos/compras/7", Some(json!({})), None, None)
        .await
        .unwrap_err();

    assert!(error.response_received());
    assert_eq!(error.status(), Some(400));
    assert_eq!(error.method(), HttpMethod::Patch);
    assert_eq!(error.path(), "pedidos/compras/7");
    assert_eq!(error.payload(), Some(&json!({"error": {"message": "invalid"}})));
}

#[tokio::test]
async fn test_error_response_without_json_has_no_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .post("contatos", Some(json!({"nome": "x"})), None, None)
        .await
        .unwrap_err();

    assert!(error.response_received());
    assert!(error.payload().is_none());
}

#[tokio::test]
async fn test_network_failure_has_no_response() {
    let config = BlingConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .base_url(BaseUrl::new("http://127.0.0.1:1").unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(&config);

    let error = client.get("contatos", None, None).await.unwrap_err();

    assert!(matches!(error, HttpError::Network { .. }));
    assert!(!error.response_received());
    assert_eq!(error.method(), HttpMethod::Get);
    assert_eq!(error.path(), "contatos");
}
