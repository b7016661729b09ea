//! Auth sub-client — login, registration, logout, session restore.

use crate::auth::{decode_claims, LoginRequest, RegisterRequest, UserIdentity};
use crate::client::EventPassClient;
use crate::error::{AuthError, HttpError, SdkError};

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Auth<'_> {
    /// Authenticate with email/password credentials.
    ///
    /// On success the token's claims are decoded once, the identity is
    /// persisted to the session store, and the HTTP layer is armed with the
    /// bearer token.
    ///
    /// # Errors
    ///
    /// [`AuthError::LoginFailed`] on rejected credentials or a deactivated
    /// account; transport failures pass through as [`SdkError::Http`].
    pub async fn login(&self, email: &str, password: &str) -> Result<UserIdentity, SdkError> {
        tracing::info!("Login attempt for email: {}", email);

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = match self.client.http.login(&request).await {
            Ok(response) => response,
            Err(HttpError::Unauthorized) => {
                return Err(AuthError::LoginFailed("invalid credentials".to_string()).into());
            }
            Err(HttpError::BadRequest(message)) | Err(HttpError::Forbidden(message)) => {
                return Err(AuthError::LoginFailed(message).into());
            }
            Err(e) => return Err(e.into()),
        };

        let claims = decode_claims(&response.token)?;
        if claims.is_expired() {
            return Err(AuthError::TokenExpired.into());
        }

        let identity = claims.identity();
        self.client.session.login(&response.token, &identity);
        self.client
            .http
            .set_auth_token(Some(response.token))
            .await;

        tracing::info!("Login successful for user: {}", identity.email);
        Ok(identity)
    }

    /// Register a new account. Does not log in — call [`Auth::login`] after.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), SdkError> {
        self.client.http.register(request).await?;
        Ok(())
    }

    /// Clear the session locally. The platform has no logout endpoint; the
    /// token simply stops being sent and ages out server-side.
    pub async fn logout(&self) {
        self.client.session.logout();
        self.client.http.clear_auth_token().await;
        tracing::info!("Session cleared");
    }

    /// Rehydrate a persisted session on process start.
    ///
    /// An expired or malformed stored token behaves like a logout: storage is
    /// cleared and `None` is returned, never an error.
    pub async fn restore(&self) -> Option<UserIdentity> {
        let (token, identity) = self.client.session.restore()?;
        self.client.http.set_auth_token(Some(token)).await;
        tracing::debug!("Session restored for user: {}", identity.email);
        Some(identity)
    }

    /// Snapshot of the current identity, if any.
    pub fn current_user(&self) -> Option<UserIdentity> {
        self.client.session.identity()
    }

    /// Whether a token and identity are currently present.
    pub fn is_authenticated(&self) -> bool {
        self.client.session.is_authenticated()
    }
}
