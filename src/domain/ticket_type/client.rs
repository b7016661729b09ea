//! Ticket-types sub-client — organizer CRUD.

use crate::client::EventPassClient;
use crate::domain::event::{TicketType, TicketTypeValidationError};
use crate::domain::ticket_type::{NewTicketType, TicketTypeUpdate};
use crate::error::SdkError;
use crate::shared::{EventId, TicketTypeId};

pub struct TicketTypes<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl TicketTypes<'_> {
    pub async fn create(
        &self,
        event_id: EventId,
        ticket: &NewTicketType,
    ) -> Result<TicketType, SdkError> {
        match self.client.http.create_ticket_type(event_id, ticket).await {
            Ok(resp) => convert(resp),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn for_event(&self, event_id: EventId) -> Result<Vec<TicketType>, SdkError> {
        let responses = self.client.http.get_ticket_types(event_id).await?;
        responses.into_iter().map(convert).collect()
    }

    pub async fn update(
        &self,
        id: TicketTypeId,
        update: &TicketTypeUpdate,
    ) -> Result<TicketType, SdkError> {
        match self.client.http.update_ticket_type(id, update).await {
            Ok(resp) => convert(resp),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn delete(&self, id: TicketTypeId) -> Result<(), SdkError> {
        match self.client.http.delete_ticket_type(id).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }
}

fn convert(
    resp: crate::domain::event::wire::TicketTypeResponse,
) -> Result<TicketType, SdkError> {
    resp.try_into()
        .map_err(|e: TicketTypeValidationError| SdkError::Validation(e.to_string()))
}
