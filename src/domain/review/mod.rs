//! Review domain.

pub mod client;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::shared::{EventId, UserId};

/// A published review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub user_id: UserId,
    pub user_name: String,
    pub event_id: EventId,
    #[serde(default)]
    pub event_name: Option<String>,
    /// 1–5 stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Aggregate rating for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub total_reviews: u64,
}

/// Body for creating or updating a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub event_id: EventId,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}
