//! PostgreSQL-backed pull request repository.
//!
//! Merge and reassign take a `FOR UPDATE` lock on the pull request row as the
//! first statement of their transaction, so concurrent calls on one pull
//! request serialise. Reviewer eligibility is decided by
//! [`crate::domain::assignment`] over rows read inside the same transaction.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use mockable::{Clock, DefaultClock};

use crate::domain::assignment::{choose_replacement, ensure_reassignable, select_initial_reviewers};
use crate::domain::ports::{PullRequestRepository, PullRequestRepositoryError};
use crate::domain::stats::order_reviewer_loads;
use crate::domain::{
    NewPullRequest, PullRequest, PullRequestId, PullRequestStatus, PullRequestSummary,
    Reassignment, ReviewStats, ReviewerLoad, ReviewerSelector, User, UserId, Username,
};

use super::diesel_error_mapping::{
    TransactionError, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{
    NewPullRequestRow, NewReviewerRow, PullRequestRow, PullRequestSummaryRow, RowConversionError,
    UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{pr_reviewers, pull_requests, users};

type PrError = PullRequestRepositoryError;
type PrTransactionError = TransactionError<PullRequestRepositoryError>;

/// Diesel-backed implementation of [`PullRequestRepository`].
#[derive(Clone)]
pub struct DieselPullRequestRepository {
    pool: DbPool,
    selector: Arc<dyn ReviewerSelector>,
    clock: Arc<dyn Clock>,
}

impl DieselPullRequestRepository {
    /// Create a repository that picks reviewers with `selector` and stamps
    /// rows with the system clock.
    pub fn new(pool: DbPool, selector: Arc<dyn ReviewerSelector>) -> Self {
        Self {
            pool,
            selector,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the clock used for creation and merge timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// PostgreSQL keeps microseconds; trimming keeps returned values equal to
    /// what a later read sees.
    fn now(&self) -> DateTime<Utc> {
        self.clock.utc().trunc_subsecs(6)
    }
}

fn map_pool(error: PoolError) -> PrError {
    map_pool_error(error, PrError::connection)
}

fn map_diesel(error: diesel::result::Error) -> PrError {
    map_diesel_error(error, PrError::query, PrError::connection)
}

fn map_conversion(error: RowConversionError) -> PrTransactionError {
    TransactionError::Port(PrError::query(error.to_string()))
}

fn rejected(reason: crate::domain::AssignmentError) -> PrTransactionError {
    TransactionError::Port(reason.into())
}

async fn lock_pull_request(
    conn: &mut AsyncPgConnection,
    id: &str,
) -> QueryResult<Option<PullRequestRow>> {
    pull_requests::table
        .find(id)
        .select(PullRequestRow::as_select())
        .for_update()
        .first(conn)
        .await
        .optional()
}

async fn load_reviewers(conn: &mut AsyncPgConnection, id: &str) -> QueryResult<Vec<String>> {
    pr_reviewers::table
        .filter(pr_reviewers::pull_request_id.eq(id))
        .order(pr_reviewers::user_id.asc())
        .select(pr_reviewers::user_id)
        .load(conn)
        .await
}

async fn find_user(conn: &mut AsyncPgConnection, user_id: &str) -> QueryResult<Option<UserRow>> {
    users::table
        .find(user_id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}

async fn load_team_users(
    conn: &mut AsyncPgConnection,
    team_name: &str,
) -> Result<Vec<User>, PrTransactionError> {
    let rows = users::table
        .filter(users::team_name.eq(team_name))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load::<UserRow>(conn)
        .await?;
    rows.into_iter()
        .map(UserRow::into_user)
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_conversion)
}

async fn load_locked_pull_request(
    conn: &mut AsyncPgConnection,
    id: &PullRequestId,
) -> Result<PullRequest, PrTransactionError> {
    let row = lock_pull_request(conn, id.as_str())
        .await?
        .ok_or_else(|| TransactionError::Port(PrError::pull_request_not_found(id.as_str())))?;
    let reviewers = load_reviewers(conn, id.as_str()).await?;
    row.into_pull_request(reviewers).map_err(map_conversion)
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl PullRequestRepository for DieselPullRequestRepository {
    async fn create(&self, draft: &NewPullRequest) -> Result<PullRequest, PrError> {
        let selector = self.selector.as_ref();
        let created_at = self.now();
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        conn.transaction(|conn| {
            async move {
                let duplicate = pull_requests::table
                    .find(draft.id.as_str())
                    .select(pull_requests::pull_request_id)
                    .first::<String>(conn)
                    .await
                    .optional()?;
                if duplicate.is_some() {
                    return Err(TransactionError::Port(PrError::duplicate_pull_request(
                        draft.id.as_str(),
                    )));
                }

                let author = find_user(conn, draft.author_id.as_str())
                    .await?
                    .ok_or_else(|| {
                        TransactionError::Port(PrError::author_not_found(draft.author_id.as_str()))
                    })?;

                diesel::insert_into(pull_requests::table)
                    .values(&NewPullRequestRow {
                        pull_request_id: draft.id.as_str(),
                        pull_request_name: draft.name.as_str(),
                        author_id: draft.author_id.as_str(),
                        status: PullRequestStatus::Open.as_str(),
                        created_at,
                    })
                    .execute(conn)
                    .await
                    .map_err(|error| {
                        if is_unique_violation(&error) {
                            TransactionError::Port(PrError::duplicate_pull_request(
                                draft.id.as_str(),
                            ))
                        } else {
                            TransactionError::Diesel(error)
                        }
                    })?;

                let teammates = load_team_users(conn, &author.team_name).await?;
                let reviewers = select_initial_reviewers(&draft.author_id, &teammates, selector);
                if !reviewers.is_empty() {
                    let rows: Vec<NewReviewerRow<'_>> = reviewers
                        .iter()
                        .map(|reviewer| NewReviewerRow {
                            pull_request_id: draft.id.as_str(),
                            user_id: reviewer.as_str(),
                        })
                        .collect();
                    diesel::insert_into(pr_reviewers::table)
                        .values(&rows)
                        .execute(conn)
                        .await?;
                }

                Ok::<PullRequest, PrTransactionError>(PullRequest::open(
                    draft.clone(),
                    reviewers,
                    created_at,
                ))
            }
            .scope_boxed()
        })
        .await
        .map_err(|error: PrTransactionError| error.into_port_error(map_diesel))
    }

    async fn merge(&self, id: &PullRequestId) -> Result<PullRequest, PrError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        conn.transaction(|conn| {
            async move {
                let mut pull_request = load_locked_pull_request(conn, id).await?;
                if pull_request.merge(self.now()) {
                    diesel::update(pull_requests::table.find(id.as_str()))
                        .set((
                            pull_requests::status.eq(pull_request.status.as_str()),
                            pull_requests::merged_at.eq(pull_request.merged_at),
                        ))
                        .execute(conn)
                        .await?;
                }
                Ok::<PullRequest, PrTransactionError>(pull_request)
            }
            .scope_boxed()
        })
        .await
        .map_err(|error: PrTransactionError| error.into_port_error(map_diesel))
    }

    async fn reassign(
        &self,
        id: &PullRequestId,
        outgoing: &UserId,
    ) -> Result<Reassignment, PrError> {
        let selector = self.selector.as_ref();
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        conn.transaction(|conn| {
            async move {
                let mut pull_request = load_locked_pull_request(conn, id).await?;
                ensure_reassignable(&pull_request, outgoing).map_err(rejected)?;

                let outgoing_user = find_user(conn, outgoing.as_str())
                    .await?
                    .ok_or_else(|| TransactionError::Port(PrError::user_not_found(outgoing.as_str())))?;
                let teammates = load_team_users(conn, &outgoing_user.team_name).await?;
                let replacement = choose_replacement(&pull_request, outgoing, &teammates, selector)
                    .map_err(rejected)?;

                diesel::delete(
                    pr_reviewers::table
                        .filter(pr_reviewers::pull_request_id.eq(id.as_str()))
                        .filter(pr_reviewers::user_id.eq(outgoing.as_str())),
                )
                .execute(conn)
                .await?;
                diesel::insert_into(pr_reviewers::table)
                    .values(&NewReviewerRow {
                        pull_request_id: id.as_str(),
                        user_id: replacement.as_str(),
                    })
                    .execute(conn)
                    .await?;

                pull_request.replace_reviewer(outgoing, replacement.clone());
                Ok::<Reassignment, PrTransactionError>(Reassignment {
                    pull_request,
                    replaced_by: replacement,
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(|error: PrTransactionError| error.into_port_error(map_diesel))
    }

    async fn list_for_reviewer(&self, user_id: &UserId) -> Result<Vec<PullRequestSummary>, PrError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let known = users::table
            .find(user_id.as_str())
            .select(users::user_id)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        if known.is_none() {
            return Err(PrError::user_not_found(user_id.as_str()));
        }

        let rows = pr_reviewers::table
            .inner_join(pull_requests::table)
            .filter(pr_reviewers::user_id.eq(user_id.as_str()))
            .order((
                pull_requests::created_at.desc(),
                pull_requests::pull_request_id.asc(),
            ))
            .select(PullRequestSummaryRow::as_select())
            .load::<PullRequestSummaryRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter()
            .map(PullRequestSummaryRow::into_summary)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| PrError::query(error.to_string()))
    }

    async fn stats(&self) -> Result<ReviewStats, PrError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let total: i64 = pull_requests::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        let open: i64 = pull_requests::table
            .filter(pull_requests::status.eq(PullRequestStatus::Open.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        let merged: i64 = pull_requests::table
            .filter(pull_requests::status.eq(PullRequestStatus::Merged.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let known_users: Vec<(String, String)> = users::table
            .select((users::user_id, users::username))
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        let assigned: Vec<String> = pr_reviewers::table
            .select(pr_reviewers::user_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        for user_id in assigned {
            *counts.entry(user_id).or_default() += 1;
        }

        let mut assignments = known_users
            .into_iter()
            .map(|(user_id, username)| {
                let count = counts.get(&user_id).copied().unwrap_or_default();
                Ok(ReviewerLoad {
                    user_id: UserId::new(user_id)?,
                    username: Username::new(username)?,
                    count,
                })
            })
            .collect::<Result<Vec<_>, crate::domain::IdentifierError>>()
            .map_err(|error| PrError::query(error.to_string()))?;
        order_reviewer_loads(&mut assignments);

        Ok(ReviewStats {
            total_prs: to_count(total),
            open_prs: to_count(open),
            merged_prs: to_count(merged),
            assignments,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for pull request repository error mapping.
    use super::*;
    use crate::domain::AssignmentError;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool(PoolError::checkout("timed out"));
        assert_eq!(err, PrError::connection("timed out"));
    }

    #[rstest]
    #[case(AssignmentError::PullRequestMerged)]
    #[case(AssignmentError::ReviewerNotAssigned)]
    #[case(AssignmentError::NoCandidate)]
    fn policy_rejections_survive_the_transaction(#[case] reason: AssignmentError) {
        let err = rejected(reason).into_port_error(map_diesel);
        assert_eq!(err, PrError::rejected(reason));
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, 0)]
    #[case(42, 42)]
    fn counts_are_clamped_to_unsigned(#[case] raw: i64, #[case] expected: u64) {
        assert_eq!(to_count(raw), expected);
    }
}
