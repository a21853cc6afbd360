//! Domain primitives, policies, and services.
//!
//! Purpose: model teams, users, and pull requests with validated identifiers,
//! keep the reviewer assignment rules free of I/O, and expose use-cases to
//! inbound adapters through the driving ports in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Team, TeamMember, User: membership model.
//! - PullRequest, PullRequestStatus, PullRequestSummary: review lifecycle.
//! - assignment: reviewer eligibility policy.
//! - TeamService, PullRequestService: driving port implementations.

pub mod assignment;
pub mod error;
pub mod identifier;
pub mod ports;
pub mod pull_request;
pub mod pull_request_service;
pub mod reviewer_selection;
pub mod stats;
pub mod team;
pub mod team_service;
pub mod trace_id;

pub use self::assignment::{AssignmentError, MAX_INITIAL_REVIEWERS};
pub use self::error::{Error, ErrorCode};
pub use self::identifier::{
    IdentifierError, PullRequestId, PullRequestName, TeamName, UserId, Username,
};
pub use self::pull_request::{
    NewPullRequest, PullRequest, PullRequestStatus, PullRequestSummary, Reassignment,
};
pub use self::pull_request_service::PullRequestService;
pub use self::reviewer_selection::{
    OrderedReviewerSelector, RandomReviewerSelector, ReviewerSelector, SeededReviewerSelector,
};
pub use self::stats::{ReviewStats, ReviewerLoad};
pub use self::team::{Team, TeamMember, TeamValidationError, User};
pub use self::team_service::TeamService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
