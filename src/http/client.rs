//! Low-level HTTP client — `EventPassHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain
//! types happens at the high-level client boundary). Every response arrives
//! wrapped in the platform envelope `{statusCode, message, data}`; this layer
//! unwraps `data` and folds `message` into errors.

use crate::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::domain::category::Category;
use crate::domain::event::wire::{EventDraft, EventResponse, TicketTypeResponse};
use crate::domain::event::EventSearch;
use crate::domain::order::{Order, OrderRequest};
use crate::domain::payment::CheckoutSession;
use crate::domain::review::{NewReview, Review, ReviewSummary};
use crate::domain::ticket_type::{NewTicketType, TicketTypeUpdate};
use crate::domain::user::{Account, ProfileUpdate};
use crate::domain::venue::Venue;
use crate::error::HttpError;
use crate::http::retry::{Backoff, RetryPolicy};
use crate::shared::{EventId, OrderId, TicketTypeId, UserId};

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// The platform's uniform response wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    #[allow(dead_code)]
    pub status_code: i32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// Low-level HTTP client for the EventPass REST API.
pub struct EventPassHttp {
    base_url: String,
    client: Client,
    /// Bearer token for authenticated requests. NEVER exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl EventPassHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            auth_token: Arc::new(RwLock::new(None)),
        }
    }

    /// Arm the bearer token used for authenticated endpoints.
    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    /// Clear the bearer token.
    pub(crate) async fn clear_auth_token(&self) {
        *self.auth_token.write().await = None;
    }

    // ── Auth ─────────────────────────────────────────────────────────────

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, HttpError> {
        let url = format!("{}/auth/login", self.base_url);
        self.post(&url, request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), HttpError> {
        let url = format!("{}/auth/register", self.base_url);
        self.post_unit(&url, request).await
    }

    // ── Events ───────────────────────────────────────────────────────────

    pub async fn get_events(&self) -> Result<Vec<EventResponse>, HttpError> {
        let url = format!("{}/events", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_event(&self, id: EventId) -> Result<EventResponse, HttpError> {
        let url = format!("{}/events/{}", self.base_url, id);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn search_events(&self, filter: &EventSearch) -> Result<Vec<EventResponse>, HttpError> {
        let mut url = format!("{}/events/search", self.base_url);
        let query = filter.to_query();
        if !query.is_empty() {
            url = format!("{}?{}", url, query);
        }
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_my_events(&self) -> Result<Vec<EventResponse>, HttpError> {
        let url = format!("{}/events/my-events", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<EventResponse, HttpError> {
        let url = format!("{}/events", self.base_url);
        self.post(&url, draft).await
    }

    pub async fn update_event(
        &self,
        id: EventId,
        draft: &EventDraft,
    ) -> Result<EventResponse, HttpError> {
        let url = format!("{}/events/{}", self.base_url, id);
        self.put(&url, draft).await
    }

    pub async fn delete_event(&self, id: EventId) -> Result<(), HttpError> {
        let url = format!("{}/events/{}", self.base_url, id);
        self.delete_unit(&url).await
    }

    pub async fn approve_event(&self, id: EventId) -> Result<EventResponse, HttpError> {
        let url = format!("{}/events/{}/approve", self.base_url, id);
        self.put_empty(&url).await
    }

    pub async fn reject_event(&self, id: EventId) -> Result<EventResponse, HttpError> {
        let url = format!("{}/events/{}/reject", self.base_url, id);
        self.put_empty(&url).await
    }

    // ── Ticket types ─────────────────────────────────────────────────────

    pub async fn create_ticket_type(
        &self,
        event_id: EventId,
        ticket: &NewTicketType,
    ) -> Result<TicketTypeResponse, HttpError> {
        let url = format!("{}/ticket-types/event/{}", self.base_url, event_id);
        self.post(&url, ticket).await
    }

    pub async fn get_ticket_types(
        &self,
        event_id: EventId,
    ) -> Result<Vec<TicketTypeResponse>, HttpError> {
        let url = format!("{}/ticket-types/event/{}", self.base_url, event_id);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn update_ticket_type(
        &self,
        id: TicketTypeId,
        update: &TicketTypeUpdate,
    ) -> Result<TicketTypeResponse, HttpError> {
        let url = format!("{}/ticket-types/{}", self.base_url, id);
        self.put(&url, update).await
    }

    pub async fn delete_ticket_type(&self, id: TicketTypeId) -> Result<(), HttpError> {
        let url = format!("{}/ticket-types/{}", self.base_url, id);
        self.delete_unit(&url).await
    }

    // ── Orders ───────────────────────────────────────────────────────────

    pub async fn create_order(&self, request: &OrderRequest) -> Result<Order, HttpError> {
        let url = format!("{}/orders", self.base_url);
        self.post(&url, request).await
    }

    pub async fn confirm_order(&self, id: OrderId) -> Result<Order, HttpError> {
        let url = format!("{}/orders/{}/confirm", self.base_url, id);
        self.put_empty(&url).await
    }

    pub async fn cancel_order(&self, id: OrderId) -> Result<Order, HttpError> {
        let url = format!("{}/orders/{}/cancel", self.base_url, id);
        self.put_empty(&url).await
    }

    pub async fn get_order(&self, id: OrderId) -> Result<Order, HttpError> {
        let url = format!("{}/orders/{}", self.base_url, id);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_my_orders(&self) -> Result<Vec<Order>, HttpError> {
        let url = format!("{}/orders/my-orders", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Payments ─────────────────────────────────────────────────────────

    pub async fn create_checkout_session(
        &self,
        request: &OrderRequest,
    ) -> Result<CheckoutSession, HttpError> {
        let url = format!("{}/payments/create-checkout-session", self.base_url);
        self.post(&url, request).await
    }

    pub async fn verify_session(&self, session_id: &str) -> Result<(), HttpError> {
        let url = format!(
            "{}/payments/verify-session/{}",
            self.base_url,
            urlencoding::encode(session_id)
        );
        self.get_unit(&url).await
    }

    // ── Venues & categories ──────────────────────────────────────────────

    pub async fn get_venues(&self) -> Result<Vec<Venue>, HttpError> {
        let url = format!("{}/venues", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_venue(&self, id: i64) -> Result<Venue, HttpError> {
        let url = format!("{}/venues/{}", self.base_url, id);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, HttpError> {
        let url = format!("{}/categories", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, HttpError> {
        let url = format!("{}/categories/{}", self.base_url, id);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Reviews ──────────────────────────────────────────────────────────

    pub async fn create_review(&self, review: &NewReview) -> Result<Review, HttpError> {
        let url = format!("{}/reviews", self.base_url);
        self.post(&url, review).await
    }

    pub async fn update_review(&self, id: i64, review: &NewReview) -> Result<Review, HttpError> {
        let url = format!("{}/reviews/{}", self.base_url, id);
        self.put(&url, review).await
    }

    pub async fn delete_review(&self, id: i64) -> Result<(), HttpError> {
        let url = format!("{}/reviews/{}", self.base_url, id);
        self.delete_unit(&url).await
    }

    pub async fn get_event_reviews(&self, event_id: EventId) -> Result<Vec<Review>, HttpError> {
        let url = format!("{}/reviews/event/{}", self.base_url, event_id);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_review_summary(&self, event_id: EventId) -> Result<ReviewSummary, HttpError> {
        let url = format!("{}/reviews/event/{}/summary", self.base_url, event_id);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_my_review(&self, event_id: EventId) -> Result<Option<Review>, HttpError> {
        let url = format!("{}/reviews/event/{}/my-review", self.base_url, event_id);
        self.get_optional(&url, RetryPolicy::Idempotent).await
    }

    pub async fn get_my_reviews(&self) -> Result<Vec<Review>, HttpError> {
        let url = format!("{}/reviews/my-reviews", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    // ── Users ────────────────────────────────────────────────────────────

    pub async fn get_profile(&self) -> Result<Account, HttpError> {
        let url = format!("{}/users/profile", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Account, HttpError> {
        let url = format!("{}/users/profile", self.base_url);
        self.put(&url, update).await
    }

    pub async fn deactivate_account(&self) -> Result<(), HttpError> {
        let url = format!("{}/users/deactivate", self.base_url);
        self.delete_unit(&url).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<Account>, HttpError> {
        let url = format!("{}/users", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn promote_organizer(&self, user_id: UserId) -> Result<Account, HttpError> {
        let url = format!("{}/users/{}/promote-organizer", self.base_url, user_id);
        self.put_empty(&url).await
    }

    pub async fn demote_organizer(&self, user_id: UserId) -> Result<Account, HttpError> {
        let url = format!("{}/users/{}/demote-organizer", self.base_url, user_id);
        self.put_empty(&url).await
    }

    pub async fn delete_user(&self, user_id: UserId) -> Result<(), HttpError> {
        let url = format!("{}/users/{}", self.base_url, user_id);
        self.delete_unit(&url).await
    }

    // ── Admin orders ─────────────────────────────────────────────────────

    pub async fn get_all_orders(&self) -> Result<Vec<Order>, HttpError> {
        let url = format!("{}/admin/orders", self.base_url);
        self.get(&url, RetryPolicy::Idempotent).await
    }

    pub async fn refund_order(&self, id: OrderId) -> Result<Order, HttpError> {
        let url = format!("{}/admin/orders/{}/refund", self.base_url, id);
        self.put_empty(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str, retry: RetryPolicy) -> Result<T, HttpError> {
        let envelope = self
            .request_with_retry::<T, ()>(reqwest::Method::GET, url, None, retry)
            .await?;
        require_data(envelope)
    }

    /// GET where a null `data` is a valid "nothing here" answer.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<Option<T>, HttpError> {
        let envelope = self
            .request_with_retry::<T, ()>(reqwest::Method::GET, url, None, retry)
            .await?;
        Ok(envelope.data)
    }

    async fn get_unit(&self, url: &str) -> Result<(), HttpError> {
        self.request_with_retry::<serde_json::Value, ()>(
            reqwest::Method::GET,
            url,
            None,
            RetryPolicy::Idempotent,
        )
        .await?;
        Ok(())
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let envelope = self
            .request_with_retry(reqwest::Method::POST, url, Some(body), RetryPolicy::None)
            .await?;
        require_data(envelope)
    }

    async fn post_unit<B: Serialize>(&self, url: &str, body: &B) -> Result<(), HttpError> {
        self.request_with_retry::<serde_json::Value, B>(
            reqwest::Method::POST,
            url,
            Some(body),
            RetryPolicy::None,
        )
        .await?;
        Ok(())
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let envelope = self
            .request_with_retry(reqwest::Method::PUT, url, Some(body), RetryPolicy::None)
            .await?;
        require_data(envelope)
    }

    /// PUT without a body — the API's verb for status transitions
    /// (confirm, cancel, refund, approve, promote).
    async fn put_empty<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let envelope = self
            .request_with_retry::<T, ()>(reqwest::Method::PUT, url, None, RetryPolicy::None)
            .await?;
        require_data(envelope)
    }

    async fn delete_unit(&self, url: &str) -> Result<(), HttpError> {
        self.request_with_retry::<serde_json::Value, ()>(
            reqwest::Method::DELETE,
            url,
            None,
            RetryPolicy::None,
        )
        .await?;
        Ok(())
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<Envelope<T>, HttpError> {
        if retry == RetryPolicy::None {
            return self.do_request(&method, url, body).await;
        }

        let backoff = Backoff::default();
        let mut last_error = None;

        for attempt in 0..=backoff.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(envelope) => return Ok(envelope),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => Backoff::retryable_status(*status),
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < backoff.max_retries {
                        let delay = backoff.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = backoff.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: backoff.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let text = resp.text().await?;
            return serde_json::from_str::<Envelope<T>>(&text)
                .map_err(|e| HttpError::MalformedEnvelope(e.to_string()));
        }

        let status_code = status.as_u16();
        let message = error_message(&resp.text().await.unwrap_or_default());

        match status_code {
            401 => Err(HttpError::Unauthorized),
            403 => Err(HttpError::Forbidden(message)),
            404 => Err(HttpError::NotFound(message)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(message)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                message,
            }),
        }
    }
}

impl Clone for EventPassHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

fn require_data<T>(envelope: Envelope<T>) -> Result<T, HttpError> {
    envelope.data.ok_or_else(|| {
        HttpError::MalformedEnvelope(
            envelope
                .message
                .unwrap_or_else(|| "response envelope carried no data".to_string()),
        )
    })
}

/// Error bodies use the same envelope; pull out `message` when possible.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) => envelope.message.unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_data() {
        let raw = r#"{"statusCode":200,"message":"OK","data":{"id":7}}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        let data = require_data(envelope).unwrap();
        assert_eq!(data["id"], 7);
    }

    #[test]
    fn test_envelope_missing_data_is_malformed() {
        let raw = r#"{"statusCode":200,"message":"Deleted"}"#;
        let envelope: Envelope<serde_json::Value> = serde_json::from_str(raw).unwrap();
        let err = require_data(envelope).unwrap_err();
        assert!(matches!(err, HttpError::MalformedEnvelope(m) if m == "Deleted"));
    }

    #[test]
    fn test_error_message_prefers_envelope_message() {
        let body = r#"{"statusCode":400,"message":"Not enough tickets available for: VIP"}"#;
        assert_eq!(
            error_message(body),
            "Not enough tickets available for: VIP"
        );
        assert_eq!(error_message("plain text"), "plain text");
    }
}
