//! Driving ports for team registration and member availability.

use async_trait::async_trait;

use crate::domain::{Error, Team, TeamName, User, UserId};

/// Mutating team operations consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamCommand: Send + Sync {
    /// Register a team and upsert its members.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::TeamExists`] when the name is taken.
    async fn create_team(&self, team: Team) -> Result<Team, Error>;

    /// Set a user's active flag.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] for unknown users.
    async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> Result<User, Error>;
}

/// Read-only team operations consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamQuery: Send + Sync {
    /// Fetch a team with members ordered by user id.
    ///
    /// # Errors
    ///
    /// [`crate::domain::ErrorCode::NotFound`] for unknown teams.
    async fn get_team(&self, team_name: &TeamName) -> Result<Team, Error>;
}
