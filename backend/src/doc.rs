//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the error envelope schemas. The generated document is served by
//! Swagger UI in debug builds and exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{ErrorBodySchema, ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PR reviewer assignment API",
        description = "Teams, pull requests, reviewer assignment and review statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::teams::add_team,
        crate::inbound::http::teams::get_team,
        crate::inbound::http::users::set_is_active,
        crate::inbound::http::users::get_reviews,
        crate::inbound::http::pull_requests::create_pull_request,
        crate::inbound::http::pull_requests::merge_pull_request,
        crate::inbound::http::pull_requests::reassign_reviewer,
        crate::inbound::http::stats::get_stats,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorBodySchema, ErrorCodeSchema)),
    tags(
        (name = "teams", description = "Team registration and lookup"),
        (name = "users", description = "User availability and review listings"),
        (name = "pullRequests", description = "Pull request lifecycle and reviewer assignment"),
        (name = "stats", description = "Aggregate review statistics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
