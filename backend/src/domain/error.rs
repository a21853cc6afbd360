//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the wire code is the stable contract clients match on.

use serde::{Deserialize, Serialize};

use crate::domain::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    BadRequest,
    /// A referenced team, user, or pull request does not exist.
    NotFound,
    /// The team name is already registered.
    TeamExists,
    /// The pull request identifier is already registered.
    PrExists,
    /// The pull request is merged and can no longer change reviewers.
    PrMerged,
    /// The user is not an assigned reviewer of the pull request.
    NotAssigned,
    /// No eligible replacement reviewer could be found.
    NoCandidate,
    /// An unexpected failure occurred inside the service.
    Internal,
}

impl ErrorCode {
    /// Wire representation of the code.
    ///
    /// # Examples
    /// ```
    /// use pr_reviewer::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::PrMerged.as_str(), "PR_MERGED");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::TeamExists => "TEAM_EXISTS",
            Self::PrExists => "PR_EXISTS",
            Self::PrMerged => "PR_MERGED",
            Self::NotAssigned => "NOT_ASSIGNED",
            Self::NoCandidate => "NO_CANDIDATE",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain error payload.
///
/// The trace identifier is captured from task-local scope at construction
/// time so adapters can correlate the failure with request logs.
///
/// # Examples
/// ```
/// use pr_reviewer::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("team not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "team not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error with the current trace identifier, if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured when the error was raised.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach an explicit trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::TeamExists`].
    pub fn team_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TeamExists, message)
    }

    /// Convenience constructor for [`ErrorCode::PrExists`].
    pub fn pr_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PrExists, message)
    }

    /// Convenience constructor for [`ErrorCode::PrMerged`].
    pub fn pr_merged(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PrMerged, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAssigned`].
    pub fn not_assigned(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAssigned, message)
    }

    /// Convenience constructor for [`ErrorCode::NoCandidate`].
    pub fn no_candidate(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoCandidate, message)
    }

    /// Convenience constructor for [`ErrorCode::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}
