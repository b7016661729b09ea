//! Ticket-type management domain (organizer surface).
//!
//! The catalog-facing [`TicketType`](crate::domain::event::TicketType) lives
//! in the event domain; this slice carries the organizer's mutation payloads.

pub mod client;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Body for creating a ticket type under an event.
///
/// `total_quantity` is fixed at creation; only `quantity_available` moves
/// afterwards (purchases, refunds, manual adjustment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicketType {
    pub name: String,
    pub price: Decimal,
    pub total_quantity: u32,
}

/// Partial update for an existing ticket type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity_available: Option<u32>,
}
