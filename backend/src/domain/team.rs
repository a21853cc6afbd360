//! Teams and their members.
//!
//! A team is identified by its immutable name. Members are users keyed by
//! [`UserId`]; registering a team upserts each member, moving existing users
//! into the new team.

use super::identifier::{TeamName, UserId, Username};

/// Validation errors raised when assembling a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TeamValidationError {
    /// A team must list at least one member.
    #[error("members must not be empty")]
    NoMembers,
}

/// A user as stored: identity, display name, team, and availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user identifier.
    pub user_id: UserId,
    /// Display name.
    pub username: Username,
    /// Team the user belongs to.
    pub team_name: TeamName,
    /// Whether the user may be picked as a reviewer.
    pub is_active: bool,
}

/// Team membership entry, without the owning team name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    /// Unique user identifier.
    pub user_id: UserId,
    /// Display name.
    pub username: Username,
    /// Whether the user may be picked as a reviewer.
    pub is_active: bool,
}

impl TeamMember {
    /// Attach the member to a team, producing the stored user shape.
    #[must_use]
    pub fn into_user(self, team_name: TeamName) -> User {
        User {
            user_id: self.user_id,
            username: self.username,
            team_name,
            is_active: self.is_active,
        }
    }
}

impl From<User> for TeamMember {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}

/// A named team and its members.
///
/// ## Invariants
/// - At least one member.
/// - Member ids are unique; when a payload repeats an id the later entry
///   wins, matching sequential upsert semantics.
///
/// # Examples
/// ```
/// use pr_reviewer::domain::{Team, TeamMember, TeamName, UserId, Username};
///
/// let member = TeamMember {
///     user_id: UserId::new("u1").expect("id"),
///     username: Username::new("Alice").expect("name"),
///     is_active: true,
/// };
/// let team = Team::new(TeamName::new("backend").expect("team"), vec![member])
///     .expect("valid team");
/// assert_eq!(team.members().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    team_name: TeamName,
    members: Vec<TeamMember>,
}

impl Team {
    /// Validate and assemble a team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamValidationError::NoMembers`] when `members` is empty.
    pub fn new(
        team_name: TeamName,
        members: Vec<TeamMember>,
    ) -> Result<Self, TeamValidationError> {
        if members.is_empty() {
            return Err(TeamValidationError::NoMembers);
        }
        let mut unique: Vec<TeamMember> = Vec::with_capacity(members.len());
        for member in members {
            match unique.iter_mut().find(|m| m.user_id == member.user_id) {
                Some(existing) => *existing = member,
                None => unique.push(member),
            }
        }
        Ok(Self {
            team_name,
            members: unique,
        })
    }

    /// Rebuild a team from stored rows, ordering members by user id.
    ///
    /// Stored teams may legitimately have no members left once every user
    /// has moved elsewhere, so no member check applies here.
    #[must_use]
    pub fn from_stored(team_name: TeamName, mut members: Vec<TeamMember>) -> Self {
        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Self { team_name, members }
    }

    /// Team name.
    #[must_use]
    pub fn team_name(&self) -> &TeamName {
        &self.team_name
    }

    /// Team members.
    #[must_use]
    pub fn members(&self) -> &[TeamMember] {
        &self.members
    }

    /// Members as stored users carrying this team's name.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.members
            .iter()
            .cloned()
            .map(|member| member.into_user(self.team_name.clone()))
            .collect()
    }
}
