//! Categories sub-client — catalog reads.

use crate::client::EventPassClient;
use crate::domain::category::Category;
use crate::error::SdkError;

pub struct Categories<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Categories<'_> {
    pub async fn list(&self) -> Result<Vec<Category>, SdkError> {
        Ok(self.client.http.get_categories().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Category, SdkError> {
        Ok(self.client.http.get_category(id).await?)
    }
}
