//! Team domain service.
//!
//! Implements the team driving ports over a [`TeamRepository`], translating
//! repository failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{TeamCommand, TeamQuery, TeamRepository, TeamRepositoryError};
use crate::domain::{Error, Team, TeamName, User, UserId};

/// Team service implementing [`TeamCommand`] and [`TeamQuery`].
#[derive(Clone)]
pub struct TeamService<R> {
    repository: Arc<R>,
}

impl<R> TeamService<R> {
    /// Create a new service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: TeamRepositoryError) -> Error {
    match error {
        TeamRepositoryError::TeamExists { .. } => Error::team_exists("team_name already exists"),
        TeamRepositoryError::Connection { message } => {
            error!(%message, "team repository unavailable");
            Error::internal(format!("team repository unavailable: {message}"))
        }
        TeamRepositoryError::Query { message } => {
            error!(%message, "team repository query failed");
            Error::internal(format!("team repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> TeamCommand for TeamService<R>
where
    R: TeamRepository,
{
    async fn create_team(&self, team: Team) -> Result<Team, Error> {
        self.repository
            .create_team(&team)
            .await
            .map_err(map_repository_error)?;
        info!(
            team_name = %team.team_name(),
            members = team.members().len(),
            "team created"
        );
        Ok(team)
    }

    async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, Error> {
        let user = self
            .repository
            .set_user_active(user_id, is_active)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;
        info!(user_id = %user.user_id, is_active, "user activity updated");
        Ok(user)
    }
}

#[async_trait]
impl<R> TeamQuery for TeamService<R>
where
    R: TeamRepository,
{
    async fn get_team(&self, team_name: &TeamName) -> Result<Team, Error> {
        self.repository
            .find_team(team_name)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("team not found"))
    }
}

#[cfg(test)]
#[path = "team_service_tests.rs"]
mod tests;
