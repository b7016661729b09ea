//! Checkout orchestrator — the two-phase create→confirm commit, made explicit.
//!
//! The commit against the order service is not atomic: an order is created
//! PENDING (inventory held), then separately confirmed (simulated payment) or
//! paid through a hosted session. `CheckoutFlow` models that as a state
//! machine so the gap between the phases is a named state rather than an
//! accident.
//!
//! Methods take `&mut self`: one attempt at a time per flow. The UI keeps its
//! triggering control disabled while a call is in flight; a second submission
//! against an already-advanced flow fails with `IllegalPhase` instead of
//! creating a duplicate order.
//!
//! Abandoning a flow after `place_order` leaves a PENDING order holding
//! inventory. Call [`CheckoutFlow::cancel`] to release it deliberately;
//! hosted-payment orders abandoned at the provider are reclaimed by the
//! backend, not by this client.

use crate::client::EventPassClient;
use crate::domain::booking::{CheckoutError, ConfirmedSelection};
use crate::domain::order::{Order, OrderRequest, OrderStatus};
use crate::domain::payment::CheckoutSession;

/// Where a checkout attempt currently stands.
#[derive(Debug, Clone)]
pub enum CheckoutPhase {
    /// Nothing submitted yet.
    Idle,
    /// PENDING order exists; inventory is held, payment outstanding.
    OrderPlaced(Order),
    /// A hosted payment session was created; completion arrives via the
    /// provider's callback, not through this flow.
    AwaitingPayment(CheckoutSession),
    /// Order is CONFIRMED. Terminal.
    Completed(Order),
    /// Order was cancelled and its inventory released. Terminal.
    Cancelled(Order),
}

impl CheckoutPhase {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::OrderPlaced(_) => "order-placed",
            Self::AwaitingPayment(_) => "awaiting-payment",
            Self::Completed(_) => "completed",
            Self::Cancelled(_) => "cancelled",
        }
    }
}

/// One checkout attempt for one confirmed selection.
pub struct CheckoutFlow {
    selection: ConfirmedSelection,
    phase: CheckoutPhase,
}

impl CheckoutFlow {
    /// Start a flow from the selection machine's output.
    pub fn new(selection: ConfirmedSelection) -> Self {
        Self {
            selection,
            phase: CheckoutPhase::Idle,
        }
    }

    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    pub fn selection(&self) -> &ConfirmedSelection {
        &self.selection
    }

    /// The order attached to this flow, once one exists.
    pub fn order(&self) -> Option<&Order> {
        match &self.phase {
            CheckoutPhase::OrderPlaced(order)
            | CheckoutPhase::Completed(order)
            | CheckoutPhase::Cancelled(order) => Some(order),
            _ => None,
        }
    }

    /// Phase 1 of the direct path: create the PENDING order. The backend
    /// holds inventory and computes the authoritative total here; losing an
    /// inventory race surfaces as `InventoryUnavailable`.
    pub async fn place_order(&mut self, client: &EventPassClient) -> Result<Order, CheckoutError> {
        self.require_idle()?;

        let request = OrderRequest::from(self.selection.clone());
        let order = client
            .orders()
            .create(&request)
            .await
            .map_err(|e| CheckoutError::classify(e, &self.selection.return_path()))?;

        self.phase = CheckoutPhase::OrderPlaced(order.clone());
        Ok(order)
    }

    /// Phase 2 of the direct path: confirm the PENDING order.
    ///
    /// Idempotent from the caller's perspective, even though the backend is
    /// not: a completed flow returns its order without another call, and a
    /// "pending only" rejection triggers a single re-read — if the order
    /// turns out to be CONFIRMED already (a duplicated confirm), that is
    /// success.
    pub async fn confirm(&mut self, client: &EventPassClient) -> Result<Order, CheckoutError> {
        let placed = match &self.phase {
            CheckoutPhase::Completed(order) => return Ok(order.clone()),
            CheckoutPhase::OrderPlaced(order) => order.id,
            other => return Err(CheckoutError::IllegalPhase(other.name())),
        };

        let return_to = self.selection.return_path();
        match client.orders().confirm(placed).await {
            Ok(order) => {
                self.phase = CheckoutPhase::Completed(order.clone());
                Ok(order)
            }
            Err(e) => {
                let classified = CheckoutError::classify(e, &return_to);
                if classified.is_rejection() {
                    // The backend refuses non-PENDING orders; check whether
                    // someone (a payment callback, a duplicated call) already
                    // confirmed this one.
                    if let Ok(order) = client.orders().get(placed).await {
                        if order.status == OrderStatus::Confirmed {
                            self.phase = CheckoutPhase::Completed(order.clone());
                            return Ok(order);
                        }
                    }
                }
                Err(classified)
            }
        }
    }

    /// The hosted-payment path: the backend creates the PENDING order and a
    /// redirect session in one step. Completion is driven by the payment
    /// provider's callback; read the order afterwards to observe it.
    pub async fn start_hosted_payment(
        &mut self,
        client: &EventPassClient,
    ) -> Result<CheckoutSession, CheckoutError> {
        self.require_idle()?;

        let request = OrderRequest::from(self.selection.clone());
        let session = client
            .payments()
            .create_checkout_session(&request)
            .await
            .map_err(|e| CheckoutError::classify(e, &self.selection.return_path()))?;

        self.phase = CheckoutPhase::AwaitingPayment(session.clone());
        Ok(session)
    }

    /// Abandon the attempt, releasing held inventory.
    pub async fn cancel(&mut self, client: &EventPassClient) -> Result<Order, CheckoutError> {
        let order_id = match &self.phase {
            CheckoutPhase::OrderPlaced(order) => order.id,
            CheckoutPhase::AwaitingPayment(session) => session.order_id,
            other => return Err(CheckoutError::IllegalPhase(other.name())),
        };

        let order = client
            .orders()
            .cancel(order_id)
            .await
            .map_err(|e| CheckoutError::classify(e, &self.selection.return_path()))?;

        self.phase = CheckoutPhase::Cancelled(order.clone());
        Ok(order)
    }

    fn require_idle(&self) -> Result<(), CheckoutError> {
        match &self.phase {
            CheckoutPhase::Idle => Ok(()),
            other => Err(CheckoutError::IllegalPhase(other.name())),
        }
    }
}
