//! Payments sub-client — hosted checkout session creation and verification.

use crate::client::EventPassClient;
use crate::domain::order::OrderRequest;
use crate::domain::payment::CheckoutSession;
use crate::error::SdkError;

/// Sub-client for payment operations.
pub struct Payments<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Payments<'_> {
    /// Create a hosted checkout session. The backend creates the PENDING
    /// order and the redirect session in one step.
    pub async fn create_checkout_session(
        &self,
        request: &OrderRequest,
    ) -> Result<CheckoutSession, SdkError> {
        tracing::info!(
            "Creating checkout session for event: {}",
            request.event_id
        );
        match self.client.http.create_checkout_session(request).await {
            Ok(session) => Ok(session),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// Ask the backend to verify a session after a redirect back from the
    /// provider. Best-effort: the authoritative confirmation is the
    /// provider's webhook.
    pub async fn verify_session(&self, session_id: &str) -> Result<(), SdkError> {
        match self.client.http.verify_session(session_id).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }
}
