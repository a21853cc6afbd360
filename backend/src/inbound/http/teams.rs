//! Team API handlers.
//!
//! ```text
//! POST /team/add {"team_name":"backend","members":[{"user_id":"u1","username":"Alice","is_active":true}]}
//! GET /team/get?team_name=backend
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Team, TeamMember, TeamValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_required;

/// Team member entry in requests and responses.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TeamMemberBody {
    #[serde(default)]
    #[schema(example = "u1")]
    pub user_id: String,
    #[serde(default)]
    #[schema(example = "Alice")]
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
}

impl From<TeamMember> for TeamMemberBody {
    fn from(member: TeamMember) -> Self {
        Self {
            user_id: member.user_id.into(),
            username: member.username.into(),
            is_active: member.is_active,
        }
    }
}

/// Team payload for `POST /team/add` and `GET /team/get`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TeamBody {
    #[serde(default)]
    #[schema(example = "backend")]
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberBody>,
}

impl From<Team> for TeamBody {
    fn from(team: Team) -> Self {
        Self {
            team_name: team.team_name().to_string(),
            members: team
                .members()
                .iter()
                .cloned()
                .map(TeamMemberBody::from)
                .collect(),
        }
    }
}

/// Response wrapper for a created team.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateTeamResponse {
    pub team: TeamBody,
}

/// Query string for `GET /team/get`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeamQueryParams {
    /// Team to fetch.
    pub team_name: String,
}

fn parse_member(body: TeamMemberBody) -> Result<TeamMember, Error> {
    Ok(TeamMember {
        user_id: parse_required(body.user_id)?,
        username: parse_required(body.username)?,
        is_active: body.is_active,
    })
}

fn parse_team(body: TeamBody) -> Result<Team, Error> {
    let team_name = parse_required(body.team_name)?;
    let members = body
        .members
        .into_iter()
        .map(parse_member)
        .collect::<Result<Vec<_>, _>>()?;
    Team::new(team_name, members).map_err(|err| match err {
        TeamValidationError::NoMembers => Error::bad_request("members must not be empty"),
    })
}

/// Register a team and upsert its members.
#[utoipa::path(
    post,
    path = "/team/add",
    request_body = TeamBody,
    responses(
        (status = 201, description = "Team created", body = CreateTeamResponse),
        (status = 400, description = "Invalid request or team exists", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["teams"],
    operation_id = "addTeam"
)]
#[post("/team/add")]
pub async fn add_team(
    state: web::Data<HttpState>,
    payload: web::Json<TeamBody>,
) -> ApiResult<HttpResponse> {
    let team = parse_team(payload.into_inner())?;
    let created = state.teams.create_team(team).await?;
    Ok(HttpResponse::Created().json(CreateTeamResponse {
        team: TeamBody::from(created),
    }))
}

/// Fetch a team with members ordered by user id.
#[utoipa::path(
    get,
    path = "/team/get",
    params(TeamQueryParams),
    responses(
        (status = 200, description = "Team", body = TeamBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Team not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["teams"],
    operation_id = "getTeam"
)]
#[get("/team/get")]
pub async fn get_team(
    state: web::Data<HttpState>,
    query: web::Query<TeamQueryParams>,
) -> ApiResult<web::Json<TeamBody>> {
    let team_name = parse_required(query.into_inner().team_name)?;
    let team = state.teams_query.get_team(&team_name).await?;
    Ok(web::Json(TeamBody::from(team)))
}

#[cfg(test)]
#[path = "teams_tests.rs"]
mod tests;
