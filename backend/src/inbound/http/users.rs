//! User API handlers.
//!
//! ```text
//! POST /users/setIsActive {"user_id":"u2","is_active":false}
//! GET /users/getReview?user_id=u2
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::pull_requests::PullRequestShortBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_required;

/// User representation including team membership.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserBody {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id.into(),
            username: user.username.into(),
            team_name: user.team_name.into(),
            is_active: user.is_active,
        }
    }
}

/// Request body for `POST /users/setIsActive`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SetIsActiveRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Response wrapper carrying a user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: UserBody,
}

/// Query string for `GET /users/getReview`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewQueryParams {
    /// Reviewer whose assignments are listed.
    pub user_id: String,
}

/// Response for `GET /users/getReview`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShortBody>,
}

/// Set a user's active flag.
#[utoipa::path(
    post,
    path = "/users/setIsActive",
    request_body = SetIsActiveRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "setUserIsActive"
)]
#[post("/users/setIsActive")]
pub async fn set_is_active(
    state: web::Data<HttpState>,
    payload: web::Json<SetIsActiveRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let body = payload.into_inner();
    let user_id = parse_required(body.user_id)?;
    let user = state.teams.set_user_active(&user_id, body.is_active).await?;
    Ok(web::Json(UserResponse { user: user.into() }))
}

/// List pull requests the user currently reviews, newest first.
#[utoipa::path(
    get,
    path = "/users/getReview",
    params(ReviewQueryParams),
    responses(
        (status = 200, description = "Assigned pull requests", body = UserReviewsResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUserReviews"
)]
#[get("/users/getReview")]
pub async fn get_reviews(
    state: web::Data<HttpState>,
    query: web::Query<ReviewQueryParams>,
) -> ApiResult<web::Json<UserReviewsResponse>> {
    let user_id = parse_required(query.into_inner().user_id)?;
    let reviews = state.reviews.list_user_reviews(&user_id).await?;
    Ok(web::Json(UserReviewsResponse {
        user_id: user_id.into(),
        pull_requests: reviews.into_iter().map(PullRequestShortBody::from).collect(),
    }))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
