//! Pull request domain service.
//!
//! Implements [`PullRequestCommand`] and [`ReviewQuery`] over a
//! [`PullRequestRepository`]. The repository owns the transaction and applies
//! the assignment policy; this layer maps outcomes to domain errors and logs
//! lifecycle transitions.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    PullRequestCommand, PullRequestRepository, PullRequestRepositoryError, ReviewQuery,
};
use crate::domain::{
    AssignmentError, Error, NewPullRequest, PullRequest, PullRequestId, PullRequestSummary,
    Reassignment, ReviewStats, UserId,
};

/// Pull request service implementing the lifecycle and reporting ports.
#[derive(Clone)]
pub struct PullRequestService<R> {
    repository: Arc<R>,
}

impl<R> PullRequestService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_assignment_error(reason: AssignmentError) -> Error {
    let message = reason.to_string();
    match reason {
        AssignmentError::PullRequestMerged => Error::pr_merged(message),
        AssignmentError::ReviewerNotAssigned => Error::not_assigned(message),
        AssignmentError::NoCandidate => Error::no_candidate(message),
    }
}

fn map_repository_error(error: PullRequestRepositoryError) -> Error {
    match error {
        PullRequestRepositoryError::DuplicatePullRequest { .. } => {
            Error::pr_exists("PR id already exists")
        }
        PullRequestRepositoryError::AuthorNotFound { .. } => Error::not_found("author not found"),
        PullRequestRepositoryError::PullRequestNotFound { .. } => {
            Error::not_found("pull request not found")
        }
        PullRequestRepositoryError::UserNotFound { .. } => Error::not_found("user not found"),
        PullRequestRepositoryError::Rejected { reason } => map_assignment_error(reason),
        PullRequestRepositoryError::Connection { message } => {
            error!(%message, "pull request repository unavailable");
            Error::internal(format!("pull request repository unavailable: {message}"))
        }
        PullRequestRepositoryError::Query { message } => {
            error!(%message, "pull request repository query failed");
            Error::internal(format!("pull request repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> PullRequestCommand for PullRequestService<R>
where
    R: PullRequestRepository,
{
    async fn create_pull_request(&self, draft: NewPullRequest) -> Result<PullRequest, Error> {
        let pull_request = self
            .repository
            .create(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(
            pull_request_id = %pull_request.id,
            author_id = %pull_request.author_id,
            reviewers = pull_request.assigned_reviewers.len(),
            "pull request created"
        );
        Ok(pull_request)
    }

    async fn merge_pull_request(&self, id: &PullRequestId) -> Result<PullRequest, Error> {
        let pull_request = self
            .repository
            .merge(id)
            .await
            .map_err(map_repository_error)?;
        info!(pull_request_id = %pull_request.id, "pull request merged");
        Ok(pull_request)
    }

    async fn reassign_reviewer(
        &self,
        id: &PullRequestId,
        outgoing: &UserId,
    ) -> Result<Reassignment, Error> {
        let reassignment = self
            .repository
            .reassign(id, outgoing)
            .await
            .map_err(map_repository_error)?;
        info!(
            pull_request_id = %id,
            outgoing = %outgoing,
            replaced_by = %reassignment.replaced_by,
            "reviewer reassigned"
        );
        Ok(reassignment)
    }
}

#[async_trait]
impl<R> ReviewQuery for PullRequestService<R>
where
    R: PullRequestRepository,
{
    async fn list_user_reviews(&self, user_id: &UserId) -> Result<Vec<PullRequestSummary>, Error> {
        self.repository
            .list_for_reviewer(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn review_stats(&self) -> Result<ReviewStats, Error> {
        self.repository.stats().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "pull_request_service_tests.rs"]
mod tests;
