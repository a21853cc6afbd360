//! Driving port for the pull request lifecycle.

use async_trait::async_trait;

use crate::domain::{Error, NewPullRequest, PullRequest, PullRequestId, Reassignment, UserId};

/// Pull request lifecycle operations consumed by inbound adapters.
///
/// Each call is atomic: on error nothing is persisted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestCommand: Send + Sync {
    /// Open a pull request and assign up to two reviewers.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::PrExists`] for duplicate ids and
    /// [`crate::domain::ErrorCode::NotFound`] for unknown authors.
    async fn create_pull_request(&self, draft: NewPullRequest) -> Result<PullRequest, Error>;

    /// Merge a pull request. Repeated merges return the current state.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] for unknown pull requests.
    async fn merge_pull_request(&self, id: &PullRequestId) -> Result<PullRequest, Error>;

    /// Replace one reviewer with an eligible teammate of theirs.
    ///
    /// # Errors
    ///
    /// `NOT_FOUND`, `PR_MERGED`, `NOT_ASSIGNED`, or `NO_CANDIDATE` codes as
    /// described by [`crate::domain::assignment`].
    async fn reassign_reviewer(
        &self,
        id: &PullRequestId,
        outgoing: &UserId,
    ) -> Result<Reassignment, Error>;
}
