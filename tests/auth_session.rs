//! Integration tests for login, session persistence, and restore.

mod common;

use std::sync::Arc;

use common::*;
use eventpass_sdk::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn login_derives_identity_from_token_claims() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let identity = login(&server, &client).await;
    // The login payload carries only {token, roles}; everything else comes
    // from the claims.
    assert_eq!(identity.id, UserId::new(3));
    assert_eq!(identity.name, "Ada");
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.roles, vec![Role::User]);

    assert!(client.auth().is_authenticated());
    assert_eq!(client.auth().current_user(), Some(identity));
}

#[tokio::test]
async fn rejected_credentials_fail_login() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .auth()
        .login("ada@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Auth(AuthError::LoginFailed(_))));
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn authenticated_requests_carry_the_bearer_token() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::new());
    let token = mint_token(3600);
    store.put("token", &token);

    let client = EventPassClient::builder()
        .base_url(&server.uri())
        .session_store(store)
        .build()
        .unwrap();

    let restored = client.auth().restore().await.expect("session restores");
    assert_eq!(restored.email, "ada@example.com");

    Mock::given(method("GET"))
        .and(path("/orders/my-orders"))
        .and(header("Authorization", format!("Bearer {token}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(200, json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let orders = client.orders().my_orders().await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn restore_of_an_expired_token_is_a_silent_logout() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::new());
    store.put("token", &mint_token(-60));
    store.put("user", "{\"id\":3,\"name\":\"Ada\",\"email\":\"ada@example.com\",\"roles\":[\"ROLE_USER\"]}");

    let client = EventPassClient::builder()
        .base_url(&server.uri())
        .session_store(store.clone())
        .build()
        .unwrap();

    assert!(client.auth().restore().await.is_none());
    // The stale state was cleared rather than surfaced.
    assert!(store.get("token").is_none());
    assert!(store.get("user").is_none());
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn restore_of_a_malformed_token_is_a_silent_logout() {
    let server = MockServer::start().await;
    let store = Arc::new(MemorySessionStore::new());
    store.put("token", "not-a-jwt");

    let client = EventPassClient::builder()
        .base_url(&server.uri())
        .session_store(store.clone())
        .build()
        .unwrap();

    assert!(client.auth().restore().await.is_none());
    assert!(store.get("token").is_none());
}

#[tokio::test]
async fn logout_clears_identity_and_stops_sending_the_token() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    login(&server, &client).await;

    client.auth().logout().await;
    assert!(!client.auth().is_authenticated());
    assert!(client.session().identity().is_none());

    // Catalog reads still work without a token.
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(200, json!([]))))
        .mount(&server)
        .await;
    assert!(client.events().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn registration_posts_the_profile() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "statusCode": 201,
            "message": "User registered successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .auth()
        .register(&RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            phone_number: None,
            address: None,
        })
        .await
        .unwrap();
}
