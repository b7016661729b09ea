//! Shared newtypes and utilities used across all domain modules.
//!
//! The id newtypes are serialization-transparent: they serialize/deserialize
//! identically to the raw numeric ids the backend sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod money;

pub use money::format_amount;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }
    };
}

id_newtype!(
    /// Identifier of an event.
    EventId
);
id_newtype!(
    /// Identifier of a ticket type (a priced admission category with its own
    /// inventory counter).
    TicketTypeId
);
id_newtype!(
    /// Identifier of an order.
    OrderId
);
id_newtype!(
    /// Identifier of a user account.
    UserId
);

// ─── Role ────────────────────────────────────────────────────────────────────

/// Platform role, as carried in token claims and user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ORGANIZER")]
    Organizer,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Organizer => "ROLE_ORGANIZER",
            Self::Admin => "ROLE_ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_newtype_serde_is_transparent() {
        let id = EventId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let back: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_role_wire_names() {
        let role: Role = serde_json::from_str("\"ROLE_ORGANIZER\"").unwrap();
        assert_eq!(role, Role::Organizer);
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ROLE_ADMIN\"");
    }
}
