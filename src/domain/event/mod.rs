//! Event domain — catalog types, validation, search filters.

pub mod client;
mod convert;
pub mod wire;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::{EventId, TicketTypeId, UserId};

// ─── EventStatus ─────────────────────────────────────────────────────────────

/// Event lifecycle status. Only APPROVED events are bookable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Self::Pending),
            "APPROVED" => Some(Self::Approved),
            "REJECTED" => Some(Self::Rejected),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── TicketType ──────────────────────────────────────────────────────────────

/// A priced admission category with its own inventory counter.
///
/// `quantity_available` is mutated server-side on purchase/refund; the client
/// only reads it for bounds checking. Invariant (validated at conversion):
/// `quantity_available <= total_quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketType {
    pub id: TicketTypeId,
    pub event_id: EventId,
    pub name: String,
    pub price: Decimal,
    pub total_quantity: u32,
    pub quantity_available: u32,
}

impl TicketType {
    pub fn is_sold_out(&self) -> bool {
        self.quantity_available == 0
    }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// Denormalized venue details carried on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueSummary {
    pub id: Option<i64>,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A fully validated catalog event with its nested ticket types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub venue: VenueSummary,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub image_url: Option<String>,
    pub organizer_id: Option<UserId>,
    pub organizer_name: Option<String>,
    pub status: EventStatus,
    pub ticket_types: Vec<TicketType>,
}

impl Event {
    /// Whether a booking attempt can succeed: approved and not in the past.
    pub fn is_open_for_booking(&self, today: NaiveDate) -> bool {
        self.status == EventStatus::Approved && self.date >= today
    }

    pub fn ticket_type(&self, id: TicketTypeId) -> Option<&TicketType> {
        self.ticket_types.iter().find(|t| t.id == id)
    }
}

// ─── Search filters ──────────────────────────────────────────────────────────

/// Filter criteria for `GET /events/search`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSearch {
    pub city: Option<String>,
    pub category_id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EventSearch {
    pub(crate) fn to_query(&self) -> String {
        let mut params = Vec::new();
        if let Some(city) = &self.city {
            params.push(format!("city={}", urlencoding::encode(city)));
        }
        if let Some(category_id) = self.category_id {
            params.push(format!("categoryId={}", category_id));
        }
        if let Some(start) = self.start_date {
            params.push(format!("startDate={}", start.format("%Y-%m-%d")));
        }
        if let Some(end) = self.end_date {
            params.push(format!("endDate={}", end.format("%Y-%m-%d")));
        }
        params.join("&")
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Shape-validation failures when converting a wire event.
#[derive(Debug)]
pub enum ValidationError {
    Multiple(EventId, Vec<ValidationError>),
    MissingTitle,
    MissingDate,
    InvalidStatus(String),
    TicketType(TicketTypeValidationError),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multiple(id, errors) => {
                writeln!(f, "Event validation errors (event {id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            Self::MissingTitle => write!(f, "Missing title"),
            Self::MissingDate => write!(f, "Missing event date"),
            Self::InvalidStatus(s) => write!(f, "Invalid status: {s}"),
            Self::TicketType(err) => write!(f, "Ticket type: {err}"),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TicketType(e) => Some(e),
            _ => None,
        }
    }
}

/// Shape-validation failures for a single ticket type.
#[derive(Debug)]
pub enum TicketTypeValidationError {
    MissingName(TicketTypeId),
    MissingPrice(TicketTypeId),
    NegativePrice(TicketTypeId),
    NegativeQuantity(TicketTypeId),
    AvailableExceedsTotal {
        id: TicketTypeId,
        available: i64,
        total: i64,
    },
}

impl fmt::Display for TicketTypeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName(id) => write!(f, "Missing name ({id})"),
            Self::MissingPrice(id) => write!(f, "Missing price ({id})"),
            Self::NegativePrice(id) => write!(f, "Negative price ({id})"),
            Self::NegativeQuantity(id) => write!(f, "Negative quantity ({id})"),
            Self::AvailableExceedsTotal {
                id,
                available,
                total,
            } => write!(
                f,
                "Available {available} exceeds total {total} ({id})"
            ),
        }
    }
}

impl std::error::Error for TicketTypeValidationError {}
