//! Authentication — typed token claims, session state, login/logout.
//!
//! ## Security model
//!
//! The backend issues an HMAC-signed JWT whose claims carry the user's
//! identity (`userId`, `name`, `roles`, `sub` = email). The client never
//! holds the signing secret, so it validates claim *shape* and *expiry*,
//! never the signature — the server re-verifies on every request anyway.
//! Claims are decoded exactly once, at login or session restore; the derived
//! [`UserIdentity`] is what the rest of the SDK reads.

pub mod client;
pub mod session;

pub use session::{MemorySessionStore, Session, SessionStore};

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::shared::{Role, UserId};

// ============================================================================
// Identity
// ============================================================================

/// The authenticated user as published by the session provider.
///
/// Derived from token claims at login/restore; readers receive snapshots that
/// stay valid until the next login/logout publish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub roles: Vec<Role>,
}

impl UserIdentity {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_organizer(&self) -> bool {
        self.has_role(Role::Organizer)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

// ============================================================================
// Token claims
// ============================================================================

/// The claim set the backend embeds in its access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject — the user's email.
    pub sub: String,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub name: String,
    pub roles: Vec<Role>,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    /// Whether the embedded expiry has passed.
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() >= self.exp
    }

    /// Derive the published identity from the claim set.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.user_id,
            name: self.name.clone(),
            email: self.sub.clone(),
            roles: self.roles.clone(),
        }
    }
}

/// Decode the claim set of a token without verifying its signature.
///
/// Expiry is deliberately not enforced here — callers decide whether an
/// expired token is an error (login) or a silent logout (restore).
///
/// # Errors
///
/// [`AuthError::MalformedToken`] when the token is not a structurally valid
/// JWT or its claims do not match [`TokenClaims`].
pub fn decode_claims(token: &str) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| AuthError::MalformedToken(e.to_string()))?;
    Ok(data.claims)
}

// ============================================================================
// Wire types
// ============================================================================

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response — the token plus a role echo. The full identity is derived
/// from the token's claims, not from this payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub roles: Vec<Role>,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
