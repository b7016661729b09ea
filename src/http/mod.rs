//! HTTP client layer — `EventPassHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::EventPassHttp;
pub use retry::{Backoff, RetryPolicy};
