//! Reviews sub-client.

use crate::client::EventPassClient;
use crate::domain::review::{NewReview, Review, ReviewSummary};
use crate::error::SdkError;
use crate::shared::EventId;

pub struct Reviews<'a> {
    pub(crate) client: &'a EventPassClient,
}

impl Reviews<'_> {
    /// Publish a review for an attended event.
    pub async fn create(&self, review: &NewReview) -> Result<Review, SdkError> {
        match self.client.http.create_review(review).await {
            Ok(review) => Ok(review),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn update(&self, id: i64, review: &NewReview) -> Result<Review, SdkError> {
        match self.client.http.update_review(id, review).await {
            Ok(review) => Ok(review),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), SdkError> {
        match self.client.http.delete_review(id).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    /// Public: all reviews for an event.
    pub async fn for_event(&self, event_id: EventId) -> Result<Vec<Review>, SdkError> {
        Ok(self.client.http.get_event_reviews(event_id).await?)
    }

    /// Public: aggregate rating for an event.
    pub async fn summary(&self, event_id: EventId) -> Result<ReviewSummary, SdkError> {
        Ok(self.client.http.get_review_summary(event_id).await?)
    }

    /// The authenticated user's review of an event, if they wrote one.
    pub async fn mine_for_event(&self, event_id: EventId) -> Result<Option<Review>, SdkError> {
        match self.client.http.get_my_review(event_id).await {
            Ok(review) => Ok(review),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }

    pub async fn mine(&self) -> Result<Vec<Review>, SdkError> {
        match self.client.http.get_my_reviews().await {
            Ok(reviews) => Ok(reviews),
            Err(e) => Err(self.client.auth_guard(e).await),
        }
    }
}
