//! Ticket selection state machine — app-owned, client-local, transient.
//!
//! One selection exists per open event view. It never touches the network:
//! availability bounds come from the `Event` snapshot it was initialized
//! with, and the backend re-validates everything at order creation anyway.

use rust_decimal::Decimal;

use crate::auth::Session;
use crate::domain::booking::{ConfirmedSelection, SelectionError};
use crate::domain::event::{Event, TicketType};
use crate::shared::{EventId, TicketTypeId};

/// Selection state for one event view.
///
/// Lifecycle: `for_event` → (`select_ticket_type` | `change_quantity`)* →
/// `confirm` → consumed. A consumed selection cannot be reused; the terminal
/// no-tickets state disables booking entirely.
#[derive(Debug, Clone)]
pub enum TicketSelection {
    /// The event has no ticket types on sale. Terminal.
    NoTicketsAvailable { event_id: EventId },
    /// A ticket type is selected and the quantity is within bounds.
    Ready(ReadySelection),
    /// The selection has been handed to the checkout orchestrator. Terminal.
    Consumed { event_id: EventId },
}

/// The live state behind [`TicketSelection::Ready`].
#[derive(Debug, Clone)]
pub struct ReadySelection {
    event_id: EventId,
    ticket_types: Vec<TicketType>,
    selected: usize,
    quantity: u32,
}

impl TicketSelection {
    /// Initialize a selection from a catalog event: the first ticket type is
    /// auto-selected with quantity 1. An event without ticket types yields
    /// the terminal `NoTicketsAvailable` state.
    pub fn for_event(event: &Event) -> Self {
        if event.ticket_types.is_empty() {
            return Self::NoTicketsAvailable { event_id: event.id };
        }
        Self::Ready(ReadySelection {
            event_id: event.id,
            ticket_types: event.ticket_types.clone(),
            selected: 0,
            quantity: 1,
        })
    }

    pub fn event_id(&self) -> EventId {
        match self {
            Self::NoTicketsAvailable { event_id }
            | Self::Consumed { event_id } => *event_id,
            Self::Ready(ready) => ready.event_id,
        }
    }

    /// The currently selected ticket type, when one exists.
    pub fn selected_ticket_type(&self) -> Option<&TicketType> {
        match self {
            Self::Ready(ready) => ready.ticket_types.get(ready.selected),
            _ => None,
        }
    }

    pub fn quantity(&self) -> Option<u32> {
        match self {
            Self::Ready(ready) => Some(ready.quantity),
            _ => None,
        }
    }

    /// Whether the booking action should be enabled at all.
    pub fn can_book(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Switch to another ticket type of the same event. Always resets the
    /// quantity to 1 — availability bounds differ per type, so a carried
    /// quantity could silently violate them.
    pub fn select_ticket_type(&mut self, id: TicketTypeId) -> Result<(), SelectionError> {
        let ready = self.ready_mut()?;
        let index = ready
            .ticket_types
            .iter()
            .position(|t| t.id == id)
            .ok_or(SelectionError::UnknownTicketType(id))?;
        ready.selected = index;
        ready.quantity = 1;
        Ok(())
    }

    /// Adjust the quantity by `delta`. Out-of-range results are a no-op:
    /// the quantity stays where it was, no error is raised.
    pub fn change_quantity(&mut self, delta: i32) {
        if let Self::Ready(ready) = self {
            let current = ready.quantity as i64;
            let next = current + delta as i64;
            let available = ready.ticket_types[ready.selected].quantity_available as i64;
            if next >= 1 && next <= available {
                ready.quantity = next as u32;
            }
        }
    }

    /// Exact total for the current selection: price × quantity in `Decimal`
    /// arithmetic. Zero when nothing is selectable.
    pub fn total(&self) -> Decimal {
        match self {
            Self::Ready(ready) => {
                let ticket = &ready.ticket_types[ready.selected];
                ticket.price * Decimal::from(ready.quantity)
            }
            _ => Decimal::ZERO,
        }
    }

    /// Consume the selection into the immutable tuple the checkout
    /// orchestrator takes.
    ///
    /// Requires an authenticated session: without one the machine signals
    /// `AuthenticationRequired` with the event's return path and stays
    /// `Ready`, so the same selection can be confirmed after login.
    pub fn confirm(&mut self, session: &Session) -> Result<ConfirmedSelection, SelectionError> {
        let ready = self.ready_mut()?;

        if !session.is_authenticated() {
            return Err(SelectionError::AuthenticationRequired {
                return_to: format!("/events/{}", ready.event_id),
            });
        }

        let ticket = &ready.ticket_types[ready.selected];
        if ticket.is_sold_out() {
            return Err(SelectionError::SoldOut);
        }

        let confirmed = ConfirmedSelection {
            event_id: ready.event_id,
            ticket_type_id: ticket.id,
            quantity: ready.quantity,
        };
        *self = Self::Consumed {
            event_id: confirmed.event_id,
        };
        Ok(confirmed)
    }

    fn ready_mut(&mut self) -> Result<&mut ReadySelection, SelectionError> {
        match self {
            Self::Ready(ready) => Ok(ready),
            Self::NoTicketsAvailable { .. } => Err(SelectionError::NoTicketsAvailable),
            Self::Consumed { .. } => Err(SelectionError::AlreadyConsumed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemorySessionStore, Session, UserIdentity};
    use crate::domain::event::{EventStatus, VenueSummary};
    use crate::shared::{Role, UserId};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn ticket(id: i64, price: Decimal, available: u32) -> TicketType {
        TicketType {
            id: TicketTypeId::new(id),
            event_id: EventId::new(1),
            name: format!("Tier {id}"),
            price,
            total_quantity: available.max(10),
            quantity_available: available,
        }
    }

    fn event_with(tickets: Vec<TicketType>) -> Event {
        Event {
            id: EventId::new(1),
            title: "Summer Gala".to_string(),
            description: String::new(),
            category_id: None,
            category_name: None,
            venue: VenueSummary {
                id: None,
                name: "Riverside Arena".to_string(),
                address: None,
                city: None,
                capacity: None,
                latitude: None,
                longitude: None,
            },
            date: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
            time: None,
            image_url: None,
            organizer_id: None,
            organizer_name: None,
            status: EventStatus::Approved,
            ticket_types: tickets,
        }
    }

    fn guest_session() -> Session {
        Session::new(Arc::new(MemorySessionStore::new()))
    }

    fn logged_in_session() -> Session {
        let session = guest_session();
        session.login(
            "tok",
            &UserIdentity {
                id: UserId::new(3),
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                roles: vec![Role::User],
            },
        );
        session
    }

    #[test]
    fn test_auto_selects_first_type_with_quantity_one() {
        let event = event_with(vec![
            ticket(1, Decimal::new(2500, 2), 3),
            ticket(2, Decimal::new(6000, 2), 5),
        ]);
        let selection = TicketSelection::for_event(&event);
        assert_eq!(
            selection.selected_ticket_type().unwrap().id,
            TicketTypeId::new(1)
        );
        assert_eq!(selection.quantity(), Some(1));
        assert!(selection.can_book());
    }

    #[test]
    fn test_empty_ticket_list_disables_booking() {
        let event = event_with(vec![]);
        let mut selection = TicketSelection::for_event(&event);
        assert!(!selection.can_book());
        assert_eq!(
            selection.confirm(&logged_in_session()).unwrap_err(),
            SelectionError::NoTicketsAvailable
        );
    }

    #[test]
    fn test_quantity_never_exceeds_availability() {
        let event = event_with(vec![ticket(1, Decimal::new(2500, 2), 3)]);
        let mut selection = TicketSelection::for_event(&event);
        for _ in 0..10 {
            selection.change_quantity(1);
        }
        assert_eq!(selection.quantity(), Some(3));
    }

    #[test]
    fn test_out_of_range_delta_is_a_noop() {
        // TicketType{price=25.00, available=3}: quantity 2, then +5 → stays 2.
        let event = event_with(vec![ticket(1, Decimal::new(2500, 2), 3)]);
        let mut selection = TicketSelection::for_event(&event);
        selection.change_quantity(1);
        assert_eq!(selection.quantity(), Some(2));
        assert_eq!(selection.total(), Decimal::new(5000, 2));

        selection.change_quantity(5);
        assert_eq!(selection.quantity(), Some(2));

        selection.change_quantity(-5);
        assert_eq!(selection.quantity(), Some(2));
    }

    #[test]
    fn test_quantity_floor_is_one() {
        let event = event_with(vec![ticket(1, Decimal::new(2500, 2), 3)]);
        let mut selection = TicketSelection::for_event(&event);
        selection.change_quantity(-1);
        assert_eq!(selection.quantity(), Some(1));
    }

    #[test]
    fn test_total_is_exact_decimal_arithmetic() {
        let price = Decimal::new(1999, 2); // 19.99
        let event = event_with(vec![ticket(1, price, 100)]);
        let mut selection = TicketSelection::for_event(&event);

        // computeTotal(t, q+1) - computeTotal(t, q) == t.price for all valid q.
        for _ in 1..100 {
            let before = selection.total();
            selection.change_quantity(1);
            assert_eq!(selection.total() - before, price);
        }
        assert_eq!(selection.total(), price * Decimal::from(100u32));
    }

    #[test]
    fn test_switching_type_resets_quantity() {
        let event = event_with(vec![
            ticket(1, Decimal::new(2500, 2), 5),
            ticket(2, Decimal::new(6000, 2), 2),
        ]);
        let mut selection = TicketSelection::for_event(&event);
        selection.change_quantity(3);
        assert_eq!(selection.quantity(), Some(4));

        selection.select_ticket_type(TicketTypeId::new(2)).unwrap();
        assert_eq!(selection.quantity(), Some(1));
        assert_eq!(
            selection.selected_ticket_type().unwrap().id,
            TicketTypeId::new(2)
        );
    }

    #[test]
    fn test_selecting_foreign_ticket_type_fails() {
        let event = event_with(vec![ticket(1, Decimal::new(2500, 2), 5)]);
        let mut selection = TicketSelection::for_event(&event);
        assert_eq!(
            selection.select_ticket_type(TicketTypeId::new(99)),
            Err(SelectionError::UnknownTicketType(TicketTypeId::new(99)))
        );
        // The prior selection is untouched.
        assert_eq!(
            selection.selected_ticket_type().unwrap().id,
            TicketTypeId::new(1)
        );
    }

    #[test]
    fn test_unauthenticated_confirm_signals_login_with_return_path() {
        let event = event_with(vec![ticket(1, Decimal::new(2500, 2), 3)]);
        let mut selection = TicketSelection::for_event(&event);

        let err = selection.confirm(&guest_session()).unwrap_err();
        assert_eq!(
            err,
            SelectionError::AuthenticationRequired {
                return_to: "/events/1".to_string()
            }
        );
        // Not consumed — the same selection resumes after login.
        assert!(selection.can_book());
        assert!(selection.confirm(&logged_in_session()).is_ok());
    }

    #[test]
    fn test_confirm_consumes_exactly_once() {
        let event = event_with(vec![ticket(1, Decimal::new(2500, 2), 3)]);
        let mut selection = TicketSelection::for_event(&event);
        selection.change_quantity(1);

        let session = logged_in_session();
        let confirmed = selection.confirm(&session).unwrap();
        assert_eq!(
            confirmed,
            ConfirmedSelection {
                event_id: EventId::new(1),
                ticket_type_id: TicketTypeId::new(1),
                quantity: 2,
            }
        );

        assert_eq!(
            selection.confirm(&session).unwrap_err(),
            SelectionError::AlreadyConsumed
        );
    }

    #[test]
    fn test_sold_out_type_cannot_confirm() {
        let event = event_with(vec![ticket(1, Decimal::new(2500, 2), 0)]);
        let mut selection = TicketSelection::for_event(&event);
        assert_eq!(
            selection.confirm(&logged_in_session()).unwrap_err(),
            SelectionError::SoldOut
        );
    }
}
