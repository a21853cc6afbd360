//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod pull_request_command;
mod pull_request_repository;
mod review_query;
mod team_command;
mod team_repository;

#[cfg(test)]
pub use pull_request_command::MockPullRequestCommand;
pub use pull_request_command::PullRequestCommand;
#[cfg(test)]
pub use pull_request_repository::MockPullRequestRepository;
pub use pull_request_repository::{PullRequestRepository, PullRequestRepositoryError};
#[cfg(test)]
pub use review_query::MockReviewQuery;
pub use review_query::ReviewQuery;
#[cfg(test)]
pub use team_command::{MockTeamCommand, MockTeamQuery};
pub use team_command::{TeamCommand, TeamQuery};
#[cfg(test)]
pub use team_repository::MockTeamRepository;
pub use team_repository::{TeamRepository, TeamRepositoryError};
