//! # EventPass SDK
//!
//! A typed Rust client for the EventPass ticketing platform: catalog reads,
//! the booking/checkout workflow, post-purchase views, and the organizer and
//! admin surfaces, all over the platform's REST API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Shared** — id newtypes, roles, money formatting
//! 2. **Auth** — typed token claims, durable session storage, the
//!    session/identity provider
//! 3. **HTTP** — `EventPassHttp` with envelope unwrapping and per-endpoint
//!    retry policies
//! 4. **Domain** — vertical slices: catalog events, the ticket-selection
//!    state machine, the checkout orchestrator, orders, payments, venues,
//!    categories, reviews, ticket-type management, users, admin
//! 5. **High-Level Client** — `EventPassClient` with nested sub-clients
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use eventpass_sdk::prelude::*;
//!
//! let client = EventPassClient::builder()
//!     .base_url("http://localhost:8080/api")
//!     .build()?;
//!
//! client.auth().login("ada@example.com", "hunter2").await?;
//!
//! let event = client.events().get(EventId::new(7)).await?;
//! let mut selection = TicketSelection::for_event(&event);
//! selection.change_quantity(1);
//!
//! let confirmed = selection.confirm(client.session())?;
//! let mut flow = client.checkout(confirmed);
//! flow.place_order(&client).await?;
//! let order = flow.confirm(&client).await?;
//! ```

// ── Layer 1: Shared ──────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Authentication: token claims, session storage, login/logout.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// HTTP client with envelope unwrapping and retry policies.
pub mod http;

// ── Layer 4: Domain ──────────────────────────────────────────────────────────

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `EventPassClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{EventId, OrderId, Role, TicketTypeId, UserId};

    // Auth + session
    pub use crate::auth::{
        LoginRequest, LoginResponse, MemorySessionStore, RegisterRequest, Session, SessionStore,
        TokenClaims, UserIdentity,
    };

    // Domain types — catalog
    pub use crate::domain::category::Category;
    pub use crate::domain::event::{Event, EventSearch, EventStatus, TicketType, VenueSummary};
    pub use crate::domain::venue::Venue;

    // Domain types — booking & checkout
    pub use crate::domain::booking::{
        CheckoutError, CheckoutFlow, CheckoutPhase, ConfirmedSelection, SelectionError,
        TicketSelection,
    };

    // Domain types — orders & payments
    pub use crate::domain::order::{
        Order, OrderItem, OrderItemRequest, OrderRequest, OrderStatus, PaymentStatus,
    };
    pub use crate::domain::payment::CheckoutSession;

    // Domain types — reviews, users, ticket-type management
    pub use crate::domain::review::{NewReview, Review, ReviewSummary};
    pub use crate::domain::ticket_type::{NewTicketType, TicketTypeUpdate};
    pub use crate::domain::user::{Account, ProfileUpdate};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    pub use crate::client::{
        AdminClient, AuthClient, CategoriesClient, EventPassClient, EventPassClientBuilder,
        EventsClient, OrdersClient, PaymentsClient, ReviewsClient, TicketTypesClient,
        UsersClient, VenuesClient,
    };
    pub use crate::http::{Backoff, RetryPolicy};
}
