//! Pull requests and their review lifecycle.
//!
//! A pull request starts `OPEN` and may transition once to `MERGED`. Merging
//! again leaves the record untouched, including its merge timestamp.

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::identifier::{PullRequestId, PullRequestName, UserId};

/// Lifecycle status of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PullRequestStatus {
    /// Accepting reviewer changes.
    Open,
    /// Merged; reviewers are frozen.
    Merged,
}

impl PullRequestStatus {
    /// Stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl std::fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pull request status: {0}")]
pub struct ParsePullRequestStatusError(String);

impl FromStr for PullRequestStatus {
    type Err = ParsePullRequestStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            other => Err(ParsePullRequestStatusError(other.to_owned())),
        }
    }
}

/// Input for opening a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPullRequest {
    /// Unique identifier chosen by the caller.
    pub id: PullRequestId,
    /// Title.
    pub name: PullRequestName,
    /// Author; must be an existing user.
    pub author_id: UserId,
}

/// A pull request with its current reviewers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Unique identifier.
    pub id: PullRequestId,
    /// Title.
    pub name: PullRequestName,
    /// Author.
    pub author_id: UserId,
    /// Lifecycle status.
    pub status: PullRequestStatus,
    /// Current reviewers, never containing the author or duplicates.
    pub assigned_reviewers: Vec<UserId>,
    /// Server-assigned creation time.
    pub created_at: DateTime<Utc>,
    /// Set once, on the first transition to merged.
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Build a freshly opened pull request.
    #[must_use]
    pub fn open(draft: NewPullRequest, reviewers: Vec<UserId>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: draft.id,
            name: draft.name,
            author_id: draft.author_id,
            status: PullRequestStatus::Open,
            assigned_reviewers: reviewers,
            created_at,
            merged_at: None,
        }
    }

    /// Whether the pull request has been merged.
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    /// Transition to merged.
    ///
    /// Returns `true` when the status changed. An existing merge timestamp is
    /// kept; otherwise `now` is recorded.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use pr_reviewer::domain::{NewPullRequest, PullRequest, PullRequestId, PullRequestName, UserId};
    ///
    /// let draft = NewPullRequest {
    ///     id: PullRequestId::new("pr-1").expect("id"),
    ///     name: PullRequestName::new("Add search").expect("name"),
    ///     author_id: UserId::new("u1").expect("author"),
    /// };
    /// let mut pr = PullRequest::open(draft, Vec::new(), Utc::now());
    /// assert!(pr.merge(Utc::now()));
    /// assert!(!pr.merge(Utc::now()));
    /// ```
    pub fn merge(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_merged() {
            return false;
        }
        self.status = PullRequestStatus::Merged;
        self.merged_at.get_or_insert(now);
        true
    }

    /// Swap one reviewer for another, keeping the reviewer count.
    pub fn replace_reviewer(&mut self, outgoing: &UserId, incoming: UserId) {
        self.assigned_reviewers.retain(|id| id != outgoing);
        self.assigned_reviewers.push(incoming);
        self.assigned_reviewers.sort();
    }

    /// Short listing form.
    #[must_use]
    pub fn summary(&self) -> PullRequestSummary {
        PullRequestSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }
}

/// Pull request listing entry without reviewers or timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSummary {
    /// Unique identifier.
    pub id: PullRequestId,
    /// Title.
    pub name: PullRequestName,
    /// Author.
    pub author_id: UserId,
    /// Lifecycle status.
    pub status: PullRequestStatus,
}

/// Outcome of a successful reviewer reassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reassignment {
    /// Pull request after the swap.
    pub pull_request: PullRequest,
    /// Reviewer who replaced the outgoing one.
    pub replaced_by: UserId,
}
