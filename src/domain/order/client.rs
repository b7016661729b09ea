//! Orders sub-client — create, confirm, cancel, query.
//!
//! Every endpoint here requires authentication; a 401 clears the local
//! session before the error is surfaced. None of these calls is retried
//! automatically — a failed attempt is terminal and resubmission is the
//! caller's decision.

use crate::client::EventPassClient;
use crate::domain::order::{Order, OrderRequest};
use crate::error::SdkError;
use crate::shared::OrderId;

/// Sub-client for order operations.
pub struct Orders<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Orders<'_> {
    /// Create an order in PENDING state. The backend allocates inventory at
    /// this point and computes the authoritative total.
    pub async fn create(&self, request: &OrderRequest) -> Result<Order, SdkError> {
        tracing::info!("Creating order for event: {}", request.event_id);
        match self.client.http.create_order(request).await {
            Ok(order) => {
                tracing::info!(
                    "Order created with id: {} (total: {})",
                    order.id,
                    order.total_amount
                );
                Ok(order)
            }
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// Confirm a PENDING order (simulated-payment path).
    ///
    /// The backend rejects confirmation of a non-PENDING order; see
    /// `CheckoutFlow::confirm` for the caller-side idempotent wrapper.
    pub async fn confirm(&self, id: OrderId) -> Result<Order, SdkError> {
        tracing::info!("Confirming order: {}", id);
        match self.client.http.confirm_order(id).await {
            Ok(order) => Ok(order),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// Cancel an order, releasing its held inventory.
    pub async fn cancel(&self, id: OrderId) -> Result<Order, SdkError> {
        tracing::info!("Cancelling order: {}", id);
        match self.client.http.cancel_order(id).await {
            Ok(order) => Ok(order),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// Fetch one order (owner or admin only).
    pub async fn get(&self, id: OrderId) -> Result<Order, SdkError> {
        match self.client.http.get_order(id).await {
            Ok(order) => Ok(order),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// All orders belonging to the authenticated user.
    pub async fn my_orders(&self) -> Result<Vec<Order>, SdkError> {
        match self.client.http.get_my_orders().await {
            Ok(orders) => Ok(orders),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }
}
