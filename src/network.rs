//! Network URL constants for the EventPass SDK.

/// Default REST API base URL (local development deployment).
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
