//! Payment domain — hosted checkout sessions.

pub mod client;

use serde::{Deserialize, Serialize};

use crate::shared::OrderId;

/// A hosted payment session created by the backend.
///
/// The backend creates the PENDING order and the provider session together;
/// `session_url` is where the user is redirected to pay. The SDK treats the
/// session as opaque — completion arrives via the provider's callback to the
/// backend, never through this client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub session_id: String,
    pub session_url: String,
    pub order_id: OrderId,
}
