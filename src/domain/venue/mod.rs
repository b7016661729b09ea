//! Venue domain.

pub mod client;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A venue as served by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
    pub capacity: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// `"lat,long"` as entered by the map picker.
    #[serde(default)]
    pub map_coordinates: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}
