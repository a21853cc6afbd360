//! Pull request API handlers.
//!
//! ```text
//! POST /pullRequest/create {"pull_request_id":"pr-1","pull_request_name":"Add search","author_id":"u1"}
//! POST /pullRequest/merge {"pull_request_id":"pr-1"}
//! POST /pullRequest/reassign {"pull_request_id":"pr-1","old_user_id":"u2"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{NewPullRequest, PullRequest, PullRequestSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_either, parse_required};

/// Full pull request representation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PullRequestBody {
    #[schema(example = "pr-1")]
    pub pull_request_id: String,
    #[schema(example = "Add search")]
    pub pull_request_name: String,
    #[schema(example = "u1")]
    pub author_id: String,
    #[schema(example = "OPEN")]
    pub status: String,
    pub assigned_reviewers: Vec<String>,
    /// RFC 3339 creation time.
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// RFC 3339 merge time, omitted while open.
    #[serde(rename = "mergedAt", default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<String>,
}

impl From<PullRequest> for PullRequestBody {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id.into(),
            pull_request_name: pr.name.into(),
            author_id: pr.author_id.into(),
            status: pr.status.as_str().to_owned(),
            assigned_reviewers: pr.assigned_reviewers.into_iter().map(String::from).collect(),
            created_at: pr.created_at.to_rfc3339(),
            merged_at: pr.merged_at.map(|at| at.to_rfc3339()),
        }
    }
}

/// Short pull request representation used in review listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PullRequestShortBody {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: String,
}

impl From<PullRequestSummary> for PullRequestShortBody {
    fn from(summary: PullRequestSummary) -> Self {
        Self {
            pull_request_id: summary.id.into(),
            pull_request_name: summary.name.into(),
            author_id: summary.author_id.into(),
            status: summary.status.as_str().to_owned(),
        }
    }
}

/// Request body for `POST /pullRequest/create`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreatePullRequestRequest {
    #[serde(default)]
    pub pull_request_id: String,
    #[serde(default)]
    pub pull_request_name: String,
    #[serde(default)]
    pub author_id: String,
}

/// Request body for `POST /pullRequest/merge`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct MergePullRequestRequest {
    #[serde(default)]
    pub pull_request_id: String,
}

/// Request body for `POST /pullRequest/reassign`.
///
/// `old_reviewer_id` is accepted as an alias for `old_user_id`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ReassignRequest {
    #[serde(default)]
    pub pull_request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_reviewer_id: Option<String>,
}

/// Response wrapper carrying a pull request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PullRequestResponse {
    pub pr: PullRequestBody,
}

/// Response for `POST /pullRequest/reassign`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReassignResponse {
    pub pr: PullRequestBody,
    pub replaced_by: String,
}

/// Open a pull request and assign up to two reviewers from the author's team.
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    request_body = CreatePullRequestRequest,
    responses(
        (status = 201, description = "Pull request created", body = PullRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Author not found", body = ErrorSchema),
        (status = 409, description = "Pull request exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pullRequests"],
    operation_id = "createPullRequest"
)]
#[post("/pullRequest/create")]
pub async fn create_pull_request(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePullRequestRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let draft = NewPullRequest {
        id: parse_required(body.pull_request_id)?,
        name: parse_required(body.pull_request_name)?,
        author_id: parse_required(body.author_id)?,
    };
    let pr = state.pull_requests.create_pull_request(draft).await?;
    Ok(HttpResponse::Created().json(PullRequestResponse { pr: pr.into() }))
}

/// Merge a pull request; repeated merges return the current state.
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    request_body = MergePullRequestRequest,
    responses(
        (status = 200, description = "Pull request merged", body = PullRequestResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Pull request not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pullRequests"],
    operation_id = "mergePullRequest"
)]
#[post("/pullRequest/merge")]
pub async fn merge_pull_request(
    state: web::Data<HttpState>,
    payload: web::Json<MergePullRequestRequest>,
) -> ApiResult<web::Json<PullRequestResponse>> {
    let id = parse_required(payload.into_inner().pull_request_id)?;
    let pr = state.pull_requests.merge_pull_request(&id).await?;
    Ok(web::Json(PullRequestResponse { pr: pr.into() }))
}

/// Replace one reviewer with an active member of their team.
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    request_body = ReassignRequest,
    responses(
        (status = 200, description = "Reviewer replaced", body = ReassignResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Pull request or user not found", body = ErrorSchema),
        (status = 409, description = "Merged, not assigned, or no candidate", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["pullRequests"],
    operation_id = "reassignReviewer"
)]
#[post("/pullRequest/reassign")]
pub async fn reassign_reviewer(
    state: web::Data<HttpState>,
    payload: web::Json<ReassignRequest>,
) -> ApiResult<web::Json<ReassignResponse>> {
    let body = payload.into_inner();
    let id = parse_required(body.pull_request_id)?;
    let outgoing = parse_either(body.old_user_id, body.old_reviewer_id)?;
    let outcome = state.pull_requests.reassign_reviewer(&id, &outgoing).await?;
    Ok(web::Json(ReassignResponse {
        pr: outcome.pull_request.into(),
        replaced_by: outcome.replaced_by.into(),
    }))
}

#[cfg(test)]
#[path = "pull_requests_tests.rs"]
mod tests;
