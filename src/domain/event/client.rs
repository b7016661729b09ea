//! Events sub-client — catalog reads plus the organizer surface.
//!
//! No caching: each call re-fetches. The platform has no client-side
//! invalidation protocol, so a cached copy could not be trusted across views.

use crate::client::EventPassClient;
use crate::domain::event::wire::{EventDraft, EventResponse};
use crate::domain::event::{Event, EventSearch, ValidationError};
use crate::error::SdkError;
use crate::shared::EventId;

/// Sub-client for catalog and organizer event operations.
pub struct Events<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Events<'_> {
    /// Fetch a single event with its nested ticket types.
    ///
    /// # Errors
    ///
    /// `HttpError::NotFound` when the remote reports no such event; a
    /// validation error when the payload fails shape checks.
    pub async fn get(&self, id: EventId) -> Result<Event, SdkError> {
        let resp = self.client.http.get_event(id).await?;
        convert(resp)
    }

    /// All approved events, for listing pages.
    pub async fn list(&self) -> Result<Vec<Event>, SdkError> {
        let responses = self.client.http.get_events().await?;
        Ok(convert_lenient(responses))
    }

    /// Filtered search over the catalog.
    pub async fn search(&self, filter: &EventSearch) -> Result<Vec<Event>, SdkError> {
        let responses = self.client.http.search_events(filter).await?;
        Ok(convert_lenient(responses))
    }

    /// Events owned by the authenticated organizer.
    pub async fn my_events(&self) -> Result<Vec<Event>, SdkError> {
        match self.client.http.get_my_events().await {
            Ok(responses) => Ok(convert_lenient(responses)),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// Submit a new event (enters PENDING until an admin approves it).
    pub async fn create(&self, draft: &EventDraft) -> Result<Event, SdkError> {
        tracing::info!("Creating event: {}", draft.title);
        match self.client.http.create_event(draft).await {
            Ok(resp) => convert(resp),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn update(&self, id: EventId, draft: &EventDraft) -> Result<Event, SdkError> {
        match self.client.http.update_event(id, draft).await {
            Ok(resp) => convert(resp),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn delete(&self, id: EventId) -> Result<(), SdkError> {
        match self.client.http.delete_event(id).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }
}

fn convert(resp: EventResponse) -> Result<Event, SdkError> {
    resp.try_into()
        .map_err(|e: ValidationError| SdkError::Validation(e.to_string()))
}

/// Convert a listing, dropping entries that fail shape validation.
///
/// One malformed row must not blank an entire listing page; each drop is
/// logged with its validation failure.
fn convert_lenient(responses: Vec<EventResponse>) -> Vec<Event> {
    responses
        .into_iter()
        .filter_map(|resp| match Event::try_from(resp) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!("Dropping event from listing: {err}");
                None
            }
        })
        .collect()
}
