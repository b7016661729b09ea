//! Order domain — orders, order items, purchase requests.

pub mod client;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::booking::ConfirmedSelection;
use crate::shared::{EventId, OrderId, TicketTypeId, UserId};

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        };
        write!(f, "{s}")
    }
}

/// Payment state attached to an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
    Failed,
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// A line item on an order.
///
/// `quantity` and `price_per_ticket` are immutable once created — a refund
/// invalidates the item (`is_valid` = false) rather than deleting it.
/// `ticket_code`/`qr_code_url` are populated asynchronously after
/// confirmation; their absence on a CONFIRMED order means "still generating".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub event_id: EventId,
    #[serde(default)]
    pub event_name: Option<String>,
    pub ticket_type_name: String,
    pub quantity: u32,
    pub price_per_ticket: Decimal,
    #[serde(default)]
    pub qr_code_url: Option<String>,
    #[serde(default)]
    pub ticket_code: Option<String>,
    #[serde(default)]
    pub is_valid: Option<bool>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl OrderItem {
    /// Whether the ticket is usable for entry. The field is lazily populated
    /// server-side; absence means not-invalidated.
    pub fn is_usable(&self) -> bool {
        self.is_valid.unwrap_or(true)
    }
}

/// A user's purchase record for one event.
///
/// `total_amount` is computed server-side at creation and never recomputed
/// by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub event_id: EventId,
    pub event_title: String,
    pub event_date: NaiveDate,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub order_items: Vec<OrderItem>,
    pub order_date: NaiveDateTime,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl Order {
    pub fn is_refunded(&self) -> bool {
        self.payment_status == PaymentStatus::Refunded
    }
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// One requested line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
}

/// Body for `POST /orders` and `POST /payments/create-checkout-session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub event_id: EventId,
    pub items: Vec<OrderItemRequest>,
}

impl From<ConfirmedSelection> for OrderRequest {
    fn from(selection: ConfirmedSelection) -> Self {
        Self {
            event_id: selection.event_id,
            items: vec![OrderItemRequest {
                ticket_type_id: selection.ticket_type_id,
                quantity: selection.quantity,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let status: OrderStatus = serde_json::from_str("\"CONFIRMED\"").unwrap();
        assert_eq!(status, OrderStatus::Confirmed);
        let payment: PaymentStatus = serde_json::from_str("\"REFUNDED\"").unwrap();
        assert_eq!(payment, PaymentStatus::Refunded);
    }

    #[test]
    fn test_order_request_from_selection() {
        let request = OrderRequest::from(ConfirmedSelection {
            event_id: EventId::new(4),
            ticket_type_id: TicketTypeId::new(9),
            quantity: 2,
        });
        assert_eq!(request.event_id, EventId::new(4));
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
    }

    #[test]
    fn test_item_usable_defaults_true_when_absent() {
        let raw = serde_json::json!({
            "id": 1,
            "orderId": 10,
            "eventId": 4,
            "ticketTypeName": "VIP",
            "quantity": 1,
            "pricePerTicket": 25.00
        });
        let item: OrderItem = serde_json::from_value(raw).unwrap();
        assert!(item.is_usable());
        assert!(item.qr_code_url.is_none());
    }
}
