//! Port for team and membership persistence.
//!
//! Adapters must apply [`TeamRepository::create_team`] atomically: either the
//! team row and every member upsert land, or nothing does.

use async_trait::async_trait;

use crate::domain::{Team, TeamName, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by team repository adapters.
    pub enum TeamRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "team repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "team repository query failed: {message}",
        /// The team name is already registered.
        TeamExists { team_name: String } =>
            "team already exists: {team_name}",
    }
}

/// Port for storing teams and toggling member availability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Register a team and upsert its members.
    ///
    /// Members that already exist are moved into this team with their name
    /// and active flag overwritten. Fails with
    /// [`TeamRepositoryError::TeamExists`] when the name is taken, whether
    /// detected by the pre-check or by a concurrent insert.
    async fn create_team(&self, team: &Team) -> Result<(), TeamRepositoryError>;

    /// Fetch a team with members ordered by user id.
    ///
    /// Returns `None` when the team does not exist.
    async fn find_team(&self, team_name: &TeamName) -> Result<Option<Team>, TeamRepositoryError>;

    /// Set a user's active flag, returning the updated user.
    ///
    /// Returns `None` when the user does not exist.
    async fn set_user_active(
        &self,
        user_id: &UserId,
        is_active: bool,
    ) -> Result<Option<User>, TeamRepositoryError>;
}
