//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the error envelope so the OpenAPI document describes
//! failure responses.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "BAD_REQUEST")]
    BadRequest,
    #[schema(rename = "NOT_FOUND")]
    NotFound,
    #[schema(rename = "TEAM_EXISTS")]
    TeamExists,
    #[schema(rename = "PR_EXISTS")]
    PrExists,
    #[schema(rename = "PR_MERGED")]
    PrMerged,
    #[schema(rename = "NOT_ASSIGNED")]
    NotAssigned,
    #[schema(rename = "NO_CANDIDATE")]
    NoCandidate,
    #[schema(rename = "INTERNAL")]
    Internal,
}

/// Code and message of a failed request.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorBodySchema {
    /// Stable machine-readable error code.
    #[schema(example = "NOT_FOUND")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "team not found")]
    message: String,
}

/// Error envelope returned by every failing endpoint.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    error: ErrorBodySchema,
}
