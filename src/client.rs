//! High-level client — `EventPassClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This
//! module keeps the builder, the injected session, and the accessor methods.

use std::sync::Arc;

use crate::auth::client::Auth;
use crate::auth::{MemorySessionStore, Session, SessionStore};
use crate::domain::admin::client::Admin;
use crate::domain::booking::{CheckoutFlow, ConfirmedSelection};
use crate::domain::category::client::Categories;
use crate::domain::event::client::Events;
use crate::domain::order::client::Orders;
use crate::domain::payment::client::Payments;
use crate::domain::review::client::Reviews;
use crate::domain::ticket_type::client::TicketTypes;
use crate::domain::user::client::Users;
use crate::domain::venue::client::Venues;
use crate::error::{HttpError, SdkError};
use crate::http::EventPassHttp;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::admin::client::Admin as AdminClient;
pub use crate::domain::category::client::Categories as CategoriesClient;
pub use crate::domain::event::client::Events as EventsClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::payment::client::Payments as PaymentsClient;
pub use crate::domain::review::client::Reviews as ReviewsClient;
pub use crate::domain::ticket_type::client::TicketTypes as TicketTypesClient;
pub use crate::domain::user::client::Users as UsersClient;
pub use crate::domain::venue::client::Venues as VenuesClient;

/// The primary entry point for the EventPass SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.events()`, `client.orders()`, etc. The session is an explicit
/// injected object — hand the builder a [`SessionStore`] backed by real
/// durable storage and call `client.auth().restore()` on process start.
pub struct EventPassClient {
    pub(crate) http: EventPassHttp,
    pub(crate) session: Session,
}

impl EventPassClient {
    pub fn builder() -> EventPassClientBuilder {
        EventPassClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn events(&self) -> Events<'_> {
        Events { client: self }
    }

    pub fn ticket_types(&self) -> TicketTypes<'_> {
        TicketTypes { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments { client: self }
    }

    pub fn venues(&self) -> Venues<'_> {
        Venues { client: self }
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories { client: self }
    }

    pub fn reviews(&self) -> Reviews<'_> {
        Reviews { client: self }
    }

    pub fn users(&self) -> Users<'_> {
        Users { client: self }
    }

    pub fn admin(&self) -> Admin<'_> {
        Admin { client: self }
    }

    /// The session/identity provider backing this client.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start a checkout for a confirmed selection.
    ///
    /// Convenience for `CheckoutFlow::new` — the flow is app-owned state,
    /// the client is only borrowed per call.
    pub fn checkout(&self, selection: ConfirmedSelection) -> CheckoutFlow {
        CheckoutFlow::new(selection)
    }

    /// Session-expiry hook for authenticated endpoints: a 401 means the
    /// token no longer holds, so the stale identity is cleared before the
    /// error surfaces. Public catalog endpoints never route through here.
    pub(crate) async fn auth_guard(&self, err: HttpError) -> SdkError {
        if matches!(err, HttpError::Unauthorized) {
            tracing::info!("Session expired; clearing identity");
            self.session.logout();
            self.http.clear_auth_token().await;
        }
        SdkError::Http(err)
    }
}

impl Clone for EventPassClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            session: self.session.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct EventPassClientBuilder {
    base_url: String,
    session_store: Arc<dyn SessionStore>,
}

impl Default for EventPassClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            session_store: Arc::new(MemorySessionStore::new()),
        }
    }
}

impl EventPassClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Back the session with real durable storage. Defaults to an in-memory
    /// store, which forgets everything when the process exits.
    pub fn session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = store;
        self
    }

    pub fn build(self) -> Result<EventPassClient, SdkError> {
        Ok(EventPassClient {
            http: EventPassHttp::new(&self.base_url),
            session: Session::new(self.session_store),
        })
    }
}
