//! Venues sub-client — catalog reads.

use crate::client::EventPassClient;
use crate::domain::venue::Venue;
use crate::error::SdkError;

pub struct Venues<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Venues<'_> {
    pub async fn list(&self) -> Result<Vec<Venue>, SdkError> {
        Ok(self.client.http.get_venues().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Venue, SdkError> {
        Ok(self.client.http.get_venue(id).await?)
    }
}
