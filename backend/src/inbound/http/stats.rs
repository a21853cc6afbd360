//! Review statistics handler.
//!
//! ```text
//! GET /stats
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ReviewStats, ReviewerLoad};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Review load of one user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewerLoadBody {
    pub user_id: String,
    pub username: String,
    pub count: u64,
}

impl From<ReviewerLoad> for ReviewerLoadBody {
    fn from(load: ReviewerLoad) -> Self {
        Self {
            user_id: load.user_id.into(),
            username: load.username.into(),
            count: load.count,
        }
    }
}

/// Response for `GET /stats`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub total_prs: u64,
    pub open_prs: u64,
    pub merged_prs: u64,
    /// Every user, by review count descending then user id.
    pub assignments: Vec<ReviewerLoadBody>,
}

impl From<ReviewStats> for StatsResponse {
    fn from(stats: ReviewStats) -> Self {
        Self {
            total_prs: stats.total_prs,
            open_prs: stats.open_prs,
            merged_prs: stats.merged_prs,
            assignments: stats
                .assignments
                .into_iter()
                .map(ReviewerLoadBody::from)
                .collect(),
        }
    }
}

/// Pull request counts and per-user review load.
#[utoipa::path(
    get,
    path = "/stats",
    responses(
        (status = 200, description = "Review statistics", body = StatsResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["stats"],
    operation_id = "getStats"
)]
#[get("/stats")]
pub async fn get_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<StatsResponse>> {
    let stats = state.reviews.review_stats().await?;
    Ok(web::Json(stats.into()))
}
