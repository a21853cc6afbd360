//! PostgreSQL-backed team repository.
//!
//! Team registration checks and inserts the team and upserts every member in
//! one transaction. A unique violation on the team insert (a concurrent
//! registration slipping past the pre-check) reports the same
//! `TeamExists` error as the pre-check.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{TeamRepository, TeamRepositoryError};
use crate::domain::{Team, TeamName, User, UserId};

use super::diesel_error_mapping::{
    TransactionError, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{NewTeamRow, NewUserRow, RowConversionError, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{teams, users};

type TeamTransactionError = TransactionError<TeamRepositoryError>;

/// Diesel-backed implementation of [`TeamRepository`].
#[derive(Clone)]
pub struct DieselTeamRepository {
    pool: DbPool,
}

impl DieselTeamRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use pr_reviewer::outbound::persistence::{DbPool, DieselTeamRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/reviews")).await?;
    /// let repository = DieselTeamRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> TeamRepositoryError {
    map_pool_error(error, TeamRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> TeamRepositoryError {
    map_diesel_error(
        error,
        TeamRepositoryError::query,
        TeamRepositoryError::connection,
    )
}

fn map_conversion(error: RowConversionError) -> TeamRepositoryError {
    TeamRepositoryError::query(error.to_string())
}

#[async_trait]
impl TeamRepository for DieselTeamRepository {
    async fn create_team(&self, team: &Team) -> Result<(), TeamRepositoryError> {
        let team_name = team.team_name().as_str();
        let members: Vec<User> = team.users();
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        conn.transaction(|conn| {
            async move {
                let existing = teams::table
                    .find(team_name)
                    .select(teams::team_name)
                    .first::<String>(conn)
                    .await
                    .optional()?;
                if existing.is_some() {
                    return Err(TransactionError::Port(TeamRepositoryError::team_exists(
                        team_name,
                    )));
                }

                diesel::insert_into(teams::table)
                    .values(&NewTeamRow { team_name })
                    .execute(conn)
                    .await
                    .map_err(|error| {
                        if is_unique_violation(&error) {
                            TransactionError::Port(TeamRepositoryError::team_exists(team_name))
                        } else {
                            TransactionError::Diesel(error)
                        }
                    })?;

                let rows: Vec<NewUserRow<'_>> = members.iter().map(NewUserRow::from).collect();
                diesel::insert_into(users::table)
                    .values(&rows)
                    .on_conflict(users::user_id)
                    .do_update()
                    .set((
                        users::username.eq(excluded(users::username)),
                        users::team_name.eq(excluded(users::team_name)),
                        users::is_active.eq(excluded(users::is_active)),
                    ))
                    .execute(conn)
                    .await?;

                Ok::<(), TeamTransactionError>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|error: TeamTransactionError| error.into_port_error(map_diesel))
    }

    async fn find_team(&self, team_name: &TeamName) -> Result<Option<Team>, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let existing = teams::table
            .find(team_name.as_str())
            .select(teams::team_name)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        if existing.is_none() {
            return Ok(None);
        }

        let rows = users::table
            .filter(users::team_name.eq(team_name.as_str()))
            .order(users::user_id.asc())
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel)?;
        let members = rows
            .into_iter()
            .map(UserRow::into_member)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_conversion)?;

        Ok(Some(Team::from_stored(team_name.clone(), members)))
    }

    async fn set_user_active(
        &self,
        user_id: &UserId,
        is_active: bool,
    ) -> Result<Option<User>, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::update(users::table.find(user_id.as_str()))
            .set(users::is_active.eq(is_active))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(UserRow::into_user)
            .transpose()
            .map_err(map_conversion)
    }
}
