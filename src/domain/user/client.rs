//! Users sub-client — the authenticated user's own profile.

use crate::client::EventPassClient;
use crate::domain::user::{Account, ProfileUpdate};
use crate::error::SdkError;

pub struct Users<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Users<'_> {
    pub async fn profile(&self) -> Result<Account, SdkError> {
        match self.client.http.get_profile().await {
            Ok(account) => Ok(account),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Account, SdkError> {
        match self.client.http.update_profile(update).await {
            Ok(account) => Ok(account),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// Deactivate the authenticated account and clear the local session.
    pub async fn deactivate(&self) -> Result<(), SdkError> {
        match self.client.http.deactivate_account().await {
            Ok(()) => {
                self.client.session.logout();
                self.client.http.clear_auth_token().await;
                Ok(())
            }
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }
}
