//! Driving port for review listings and statistics.

use async_trait::async_trait;

use crate::domain::{Error, PullRequestSummary, ReviewStats, UserId};

/// Read-only review reporting consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Pull requests the user currently reviews, newest first.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] for unknown users.
    async fn list_user_reviews(&self, user_id: &UserId) -> Result<Vec<PullRequestSummary>, Error>;

    /// Aggregate pull request counts and per-user review load.
    async fn review_stats(&self) -> Result<ReviewStats, Error>;
}
