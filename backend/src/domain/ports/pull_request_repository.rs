//! Port for pull request persistence and reviewer assignment.
//!
//! Every mutating method is one transaction. Merge and reassign lock the pull
//! request row before reading it, so concurrent calls on the same pull request
//! serialise while different pull requests proceed in parallel. Adapters
//! delegate the eligibility rules to [`crate::domain::assignment`].

use async_trait::async_trait;

use crate::domain::{
    AssignmentError, NewPullRequest, PullRequest, PullRequestId, PullRequestSummary, Reassignment,
    ReviewStats, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by pull request repository adapters.
    pub enum PullRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "pull request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "pull request repository query failed: {message}",
        /// The pull request identifier is already registered.
        DuplicatePullRequest { pull_request_id: String } =>
            "pull request already exists: {pull_request_id}",
        /// The author of a new pull request does not exist.
        AuthorNotFound { user_id: String } =>
            "author not found: {user_id}",
        /// The pull request does not exist.
        PullRequestNotFound { pull_request_id: String } =>
            "pull request not found: {pull_request_id}",
        /// The referenced user does not exist.
        UserNotFound { user_id: String } =>
            "user not found: {user_id}",
        /// The assignment policy refused the change.
        Rejected { reason: AssignmentError } =>
            "reviewer change rejected: {reason}",
    }
}

impl From<AssignmentError> for PullRequestRepositoryError {
    fn from(reason: AssignmentError) -> Self {
        Self::rejected(reason)
    }
}

/// Port for the pull request lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Open a pull request and assign up to two reviewers from the author's
    /// team.
    async fn create(
        &self,
        draft: &NewPullRequest,
    ) -> Result<PullRequest, PullRequestRepositoryError>;

    /// Merge a pull request; merging a merged pull request is a no-op.
    async fn merge(&self, id: &PullRequestId) -> Result<PullRequest, PullRequestRepositoryError>;

    /// Replace `outgoing` with an eligible reviewer from their team.
    async fn reassign(
        &self,
        id: &PullRequestId,
        outgoing: &UserId,
    ) -> Result<Reassignment, PullRequestRepositoryError>;

    /// Pull requests currently reviewed by `user_id`, newest first.
    ///
    /// Fails with [`PullRequestRepositoryError::UserNotFound`] for unknown
    /// users.
    async fn list_for_reviewer(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PullRequestSummary>, PullRequestRepositoryError>;

    /// Pull request counts and per-user review load.
    async fn stats(&self) -> Result<ReviewStats, PullRequestRepositoryError>;
}
