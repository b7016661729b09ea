//! Booking domain — ticket selection state machine and checkout orchestration.

pub mod checkout;
pub mod state;

pub use checkout::{CheckoutFlow, CheckoutPhase};
pub use state::TicketSelection;

use thiserror::Error;

use crate::error::{HttpError, SdkError};
use crate::shared::{EventId, TicketTypeId};

/// The immutable output of a confirmed selection — everything the order
/// orchestrator needs, nothing it can mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedSelection {
    pub event_id: EventId,
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
}

impl ConfirmedSelection {
    /// The path a login flow should return to so the booking can resume.
    pub fn return_path(&self) -> String {
        format!("/events/{}", self.event_id)
    }
}

/// Failures raised by the selection state machine. All are local — no
/// network call has happened yet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The caller must authenticate and can resume at `return_to`.
    #[error("authentication required (resume at {return_to})")]
    AuthenticationRequired { return_to: String },

    #[error("ticket type {0} does not belong to this event")]
    UnknownTicketType(TicketTypeId),

    #[error("this event has no ticket types on sale")]
    NoTicketsAvailable,

    #[error("selected ticket type is sold out")]
    SoldOut,

    #[error("selection already consumed; start a new one")]
    AlreadyConsumed,
}

/// Checkout failure taxonomy, as surfaced to callers.
///
/// Every variant is terminal for the current attempt; nothing is retried
/// automatically. `AuthenticationRequired` and `InventoryUnavailable` are
/// recoverable by the user (log in / reduce quantity), `NotFound` ends the
/// current navigation, `Transport` invites a manual retry.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("authentication required (resume at {return_to})")]
    AuthenticationRequired { return_to: String },

    #[error("inventory unavailable: {0}")]
    InventoryUnavailable(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport failure: {0}")]
    Transport(String),

    /// Phase misuse — e.g. confirming before an order exists, or submitting
    /// twice. Doubles as the guard against duplicate submission.
    #[error("operation not valid in the {0} phase")]
    IllegalPhase(&'static str),
}

/// Message prefix the backend uses for an exhausted-inventory rejection.
const INVENTORY_MESSAGE: &str = "Not enough tickets available";

impl CheckoutError {
    /// Classify an SDK error into the checkout taxonomy.
    pub(crate) fn classify(err: SdkError, return_to: &str) -> Self {
        match err {
            SdkError::Http(HttpError::Unauthorized) | SdkError::Auth(_) => {
                Self::AuthenticationRequired {
                    return_to: return_to.to_string(),
                }
            }
            SdkError::Http(HttpError::BadRequest(message))
                if message.starts_with(INVENTORY_MESSAGE) =>
            {
                Self::InventoryUnavailable(message)
            }
            SdkError::Http(HttpError::BadRequest(message))
            | SdkError::Http(HttpError::Forbidden(message)) => Self::ValidationFailed(message),
            SdkError::Http(HttpError::NotFound(message)) => Self::NotFound(message),
            SdkError::Validation(message) => Self::ValidationFailed(message),
            other => Self::Transport(other.to_string()),
        }
    }

    /// Whether the backend rejected the call as a business-rule violation
    /// (as opposed to failing to process it at all).
    pub(crate) fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed(_) | Self::InventoryUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_unauthorized_carries_return_path() {
        let err = CheckoutError::classify(
            SdkError::Http(HttpError::Unauthorized),
            "/events/7",
        );
        assert!(matches!(
            err,
            CheckoutError::AuthenticationRequired { return_to } if return_to == "/events/7"
        ));
    }

    #[test]
    fn test_classify_inventory_rejection() {
        let err = CheckoutError::classify(
            SdkError::Http(HttpError::BadRequest(
                "Not enough tickets available for: VIP".to_string(),
            )),
            "/events/7",
        );
        assert!(matches!(err, CheckoutError::InventoryUnavailable(_)));
    }

    #[test]
    fn test_classify_other_bad_request_is_validation() {
        let err = CheckoutError::classify(
            SdkError::Http(HttpError::BadRequest(
                "Ticket type does not belong to this event".to_string(),
            )),
            "/events/7",
        );
        assert!(matches!(err, CheckoutError::ValidationFailed(_)));
    }

    #[test]
    fn test_classify_transport() {
        let err = CheckoutError::classify(
            SdkError::Http(HttpError::Timeout),
            "/events/7",
        );
        assert!(matches!(err, CheckoutError::Transport(_)));
    }
}
