//! Session state — durable storage interface and the identity provider.
//!
//! `Session` is an explicit, injected object: components that need the
//! current identity hold a clone and read snapshots. It performs no network
//! calls itself; the auth sub-client hands it login results and it publishes
//! them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::auth::{decode_claims, UserIdentity};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the serialized user identity.
pub const USER_KEY: &str = "user";

/// Durable client-side key/value storage (browser local storage, a keychain,
/// a config file). Consumed interface only — the SDK ships an in-memory
/// implementation and callers provide a real one.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory [`SessionStore`] for native use and tests.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("session store lock poisoned")
            .remove(key);
    }
}

/// The session/identity provider.
///
/// Identity is written only by login/logout and read by everything else;
/// reads return cloned snapshots, valid until the next publish.
pub struct Session {
    store: Arc<dyn SessionStore>,
    identity: Arc<RwLock<Option<UserIdentity>>>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            identity: Arc::new(RwLock::new(None)),
        }
    }

    /// Snapshot of the current identity.
    pub fn identity(&self) -> Option<UserIdentity> {
        self.identity
            .read()
            .expect("identity lock poisoned")
            .clone()
    }

    /// True iff both a token and a published identity are present.
    pub fn is_authenticated(&self) -> bool {
        self.identity().is_some() && self.store.get(TOKEN_KEY).is_some()
    }

    /// Persist a fresh login and publish the identity.
    ///
    /// Callers perform the actual authentication request (the auth
    /// sub-client, a login page) and hand the result here.
    pub fn login(&self, token: &str, identity: &UserIdentity) {
        self.store.put(TOKEN_KEY, token);
        if let Ok(serialized) = serde_json::to_string(identity) {
            self.store.put(USER_KEY, &serialized);
        }
        *self.identity.write().expect("identity lock poisoned") = Some(identity.clone());
    }

    /// Clear persisted state and publish a null identity.
    pub fn logout(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        *self.identity.write().expect("identity lock poisoned") = None;
    }

    /// Rehydrate the session from durable storage.
    ///
    /// A missing, malformed, or expired token is treated as a logout — the
    /// stale state is cleared and `None` is returned; no error escapes to the
    /// caller. Returns the token alongside the identity so the HTTP layer can
    /// be re-armed.
    pub(crate) fn restore(&self) -> Option<(String, UserIdentity)> {
        let token = self.store.get(TOKEN_KEY)?;

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(err) => {
                tracing::debug!("Discarding stored session: {err}");
                self.logout();
                return None;
            }
        };
        if claims.is_expired() {
            tracing::debug!("Discarding stored session: token expired");
            self.logout();
            return None;
        }

        // Prefer the stored identity; fall back to the claims when the
        // stored copy is missing or unreadable.
        let identity = self
            .store
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<UserIdentity>(&raw).ok())
            .unwrap_or_else(|| claims.identity());

        *self.identity.write().expect("identity lock poisoned") = Some(identity.clone());
        Some((token, identity))
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            identity: self.identity.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Role, UserId};

    fn identity() -> UserIdentity {
        UserIdentity {
            id: UserId::new(3),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            roles: vec![Role::User],
        }
    }

    #[test]
    fn test_login_publishes_and_stores() {
        let store = Arc::new(MemorySessionStore::new());
        let session = Session::new(store.clone());
        assert!(!session.is_authenticated());

        session.login("tok", &identity());
        assert!(session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok"));
        assert!(store.get(USER_KEY).is_some());
        assert_eq!(session.identity().unwrap().name, "Grace");
    }

    #[test]
    fn test_logout_removes_everything() {
        let store = Arc::new(MemorySessionStore::new());
        let session = Session::new(store.clone());
        session.login("tok", &identity());
        session.logout();

        assert!(!session.is_authenticated());
        assert!(store.get(TOKEN_KEY).is_none());
        assert!(store.get(USER_KEY).is_none());
        assert!(session.identity().is_none());
    }

    #[test]
    fn test_restore_with_malformed_token_logs_out() {
        let store = Arc::new(MemorySessionStore::new());
        store.put(TOKEN_KEY, "garbage");
        store.put(USER_KEY, "{}");

        let session = Session::new(store.clone());
        assert!(session.restore().is_none());
        // Stale state was cleared, not surfaced as an error.
        assert!(store.get(TOKEN_KEY).is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_snapshots_are_stable_across_clones() {
        let session = Session::new(Arc::new(MemorySessionStore::new()));
        let reader = session.clone();
        session.login("tok", &identity());
        // The clone observes the publish; a taken snapshot does not mutate.
        let snapshot = reader.identity().unwrap();
        session.logout();
        assert_eq!(snapshot.name, "Grace");
        assert!(reader.identity().is_none());
    }
}
