//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types re-validate
//! stored identifiers so corrupt rows surface as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::pull_request::ParsePullRequestStatusError;
use crate::domain::{
    IdentifierError, PullRequest, PullRequestId, PullRequestName, PullRequestSummary, TeamMember,
    TeamName, User, UserId, Username,
};

use super::schema::{pr_reviewers, pull_requests, teams, users};

/// Stored data that no longer satisfies domain validation.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("invalid stored identifier: {0}")]
    Identifier(#[from] IdentifierError),
    #[error(transparent)]
    Status(#[from] ParsePullRequestStatusError),
}

/// Insertable struct for the teams table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub(crate) struct NewTeamRow<'a> {
    pub team_name: &'a str,
}

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, RowConversionError> {
        Ok(User {
            user_id: UserId::new(self.user_id)?,
            username: Username::new(self.username)?,
            team_name: TeamName::new(self.team_name)?,
            is_active: self.is_active,
        })
    }

    pub(crate) fn into_member(self) -> Result<TeamMember, RowConversionError> {
        self.into_user().map(TeamMember::from)
    }
}

/// Insertable struct for upserting users.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
    pub team_name: &'a str,
    pub is_active: bool,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            user_id: user.user_id.as_str(),
            username: user.username.as_str(),
            team_name: user.team_name.as_str(),
            is_active: user.is_active,
        }
    }
}

/// Row struct for reading from the pull_requests table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pull_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PullRequestRow {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequestRow {
    pub(crate) fn into_pull_request(
        self,
        reviewers: Vec<String>,
    ) -> Result<PullRequest, RowConversionError> {
        let assigned_reviewers = reviewers
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PullRequest {
            id: PullRequestId::new(self.pull_request_id)?,
            name: PullRequestName::new(self.pull_request_name)?,
            author_id: UserId::new(self.author_id)?,
            status: self.status.parse()?,
            assigned_reviewers,
            created_at: self.created_at,
            merged_at: self.merged_at,
        })
    }
}

/// Insertable struct for opening pull requests.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pull_requests)]
pub(crate) struct NewPullRequestRow<'a> {
    pub pull_request_id: &'a str,
    pub pull_request_name: &'a str,
    pub author_id: &'a str,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Listing row for pull requests without timestamps.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = pull_requests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PullRequestSummaryRow {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
}

impl PullRequestSummaryRow {
    pub(crate) fn into_summary(self) -> Result<PullRequestSummary, RowConversionError> {
        Ok(PullRequestSummary {
            id: PullRequestId::new(self.pull_request_id)?,
            name: PullRequestName::new(self.pull_request_name)?,
            author_id: UserId::new(self.author_id)?,
            status: self.status.parse()?,
        })
    }
}

/// Insertable struct for reviewer assignments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = pr_reviewers)]
pub(crate) struct NewReviewerRow<'a> {
    pub pull_request_id: &'a str,
    pub user_id: &'a str,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversions.
    use super::*;
    use crate::domain::PullRequestStatus;

    fn pull_request_row(status: &str) -> PullRequestRow {
        PullRequestRow {
            pull_request_id: "pr-1".to_owned(),
            pull_request_name: "Add search".to_owned(),
            author_id: "u1".to_owned(),
            status: status.to_owned(),
            created_at: Utc::now(),
            merged_at: None,
        }
    }

    #[test]
    fn pull_request_rows_convert_with_reviewers() {
        let pr = pull_request_row("OPEN")
            .into_pull_request(vec!["u2".to_owned(), "u3".to_owned()])
            .expect("valid row");
        assert_eq!(pr.status, PullRequestStatus::Open);
        assert_eq!(pr.assigned_reviewers.len(), 2);
    }

    #[test]
    fn unknown_statuses_are_rejected() {
        let err = pull_request_row("DRAFT")
            .into_pull_request(Vec::new())
            .expect_err("bad status");
        assert!(matches!(err, RowConversionError::Status(_)));
    }

    #[test]
    fn blank_stored_identifiers_are_rejected() {
        let row = UserRow {
            user_id: " ".to_owned(),
            username: "Alice".to_owned(),
            team_name: "backend".to_owned(),
            is_active: true,
        };
        assert!(matches!(
            row.into_user(),
            Err(RowConversionError::Identifier(_))
        ));
    }
}
