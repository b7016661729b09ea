//! Admin sub-client. Every endpoint here requires the admin role; the
//! backend enforces it, this client just routes.

use crate::client::EventPassClient;
use crate::domain::event::{Event, ValidationError};
use crate::domain::order::Order;
use crate::domain::user::Account;
use crate::error::SdkError;
use crate::shared::{EventId, OrderId, UserId};

pub struct Admin<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Admin<'_> {
    // ── Orders ───────────────────────────────────────────────────────────

    /// Every order on the platform, newest first.
    pub async fn all_orders(&self) -> Result<Vec<Order>, SdkError> {
        match self.client.http.get_all_orders().await {
            Ok(orders) => Ok(orders),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// Refund a CONFIRMED/COMPLETED order: payment becomes REFUNDED, every
    /// ticket is invalidated (QR codes stop working), inventory is restored.
    /// Order history is kept — refunds invalidate, they never delete.
    pub async fn refund_order(&self, id: OrderId) -> Result<Order, SdkError> {
        tracing::info!("Processing refund for order: {}", id);
        match self.client.http.refund_order(id).await {
            Ok(order) => Ok(order),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    // ── Event moderation ─────────────────────────────────────────────────

    pub async fn approve_event(&self, id: EventId) -> Result<Event, SdkError> {
        tracing::info!("Approving event: {}", id);
        match self.client.http.approve_event(id).await {
            Ok(resp) => convert(resp),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn reject_event(&self, id: EventId) -> Result<Event, SdkError> {
        tracing::info!("Rejecting event: {}", id);
        match self.client.http.reject_event(id).await {
            Ok(resp) => convert(resp),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    // ── User management ──────────────────────────────────────────────────

    pub async fn all_users(&self) -> Result<Vec<Account>, SdkError> {
        match self.client.http.get_all_users().await {
            Ok(users) => Ok(users),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn promote_organizer(&self, user_id: UserId) -> Result<Account, SdkError> {
        match self.client.http.promote_organizer(user_id).await {
            Ok(account) => Ok(account),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn demote_organizer(&self, user_id: UserId) -> Result<Account, SdkError> {
        match self.client.http.demote_organizer(user_id).await {
            Ok(account) => Ok(account),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn delete_user(&self, user_id: UserId) -> Result<(), SdkError> {
        match self.client.http.delete_user(user_id).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }
}

fn convert(resp: crate::domain::event::wire::EventResponse) -> Result<Event, SdkError> {
    resp.try_into()
        .map_err(|e: ValidationError| SdkError::Validation(e.to_string()))
}
