//! Shared fixtures for the integration tests: token minting, envelope
//! wrapping, and canned catalog/order payloads.
#![allow(dead_code)]

use eventpass_sdk::prelude::*;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Mint a signed token the way the backend would. The SDK never verifies the
/// signature, but the claims must decode.
pub fn mint_token(exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": "ada@example.com",
        "userId": 3,
        "name": "Ada",
        "roles": ["ROLE_USER"],
        "iat": now,
        "exp": now + exp_offset_secs,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("token encodes")
}

/// Wrap a payload in the platform's `{statusCode, message, data}` envelope.
pub fn envelope(status_code: u16, data: Value) -> Value {
    json!({
        "statusCode": status_code,
        "message": "OK",
        "data": data,
    })
}

/// An error body in the same envelope shape, with no data.
pub fn error_envelope(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "message": message,
    })
}

/// Catalog event 1 with one ticket type: id 1, price 25.00, 3 of 10 left.
pub fn event_body() -> Value {
    json!({
        "id": 1,
        "title": "Summer Gala",
        "description": "Open air concert",
        "categoryId": 2,
        "categoryName": "Music",
        "venueId": 5,
        "venueName": "Riverside Arena",
        "venueCity": "Patras",
        "venueCapacity": 1200,
        "eventDate": "2027-09-12",
        "eventTime": "20:30:00",
        "organizerId": 9,
        "organizerName": "Nia",
        "status": "APPROVED",
        "ticketTypes": [
            {
                "id": 1,
                "eventId": 1,
                "name": "General Admission",
                "price": 25.00,
                "totalQuantity": 10,
                "quantityAvailable": 3
            }
        ]
    })
}

/// Order 10 for event 1: 2 × 25.00, in the given states.
pub fn order_body(status: &str, payment_status: &str, items_valid: bool) -> Value {
    json!({
        "id": 10,
        "userId": 3,
        "userName": "Ada",
        "userEmail": "ada@example.com",
        "eventId": 1,
        "eventTitle": "Summer Gala",
        "eventDate": "2027-09-12",
        "totalAmount": 50.00,
        "status": status,
        "paymentStatus": payment_status,
        "orderDate": "2026-08-06T12:30:00",
        "orderItems": [
            {
                "id": 100,
                "orderId": 10,
                "eventId": 1,
                "eventName": "Summer Gala",
                "ticketTypeName": "General Admission",
                "quantity": 2,
                "pricePerTicket": 25.00,
                "isValid": items_valid,
                "createdAt": "2026-08-06T12:30:00"
            }
        ]
    })
}

/// A client pointed at the mock server, with an in-memory session store.
pub fn client_for(server: &MockServer) -> EventPassClient {
    EventPassClient::builder()
        .base_url(&server.uri())
        .build()
        .expect("client builds")
}

/// Mount a login mock and authenticate the client.
pub async fn login(server: &MockServer, client: &EventPassClient) -> UserIdentity {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            200,
            json!({ "token": mint_token(3600), "roles": ["ROLE_USER"] }),
        )))
        .mount(server)
        .await;

    client
        .auth()
        .login("ada@example.com", "hunter2")
        .await
        .expect("login succeeds")
}
