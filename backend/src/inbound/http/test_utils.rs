//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::{OrderedReviewerSelector, PullRequestService, TeamService};
use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{pull_requests, stats, teams, users};
use crate::outbound::memory::InMemoryReviewStore;

/// Handler state over a fresh in-memory store with deterministic selection.
pub fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryReviewStore::new(Arc::new(OrderedReviewerSelector)));
    let teams = Arc::new(TeamService::new(store.clone()));
    let pull_requests = Arc::new(PullRequestService::new(store));
    HttpState::new(teams.clone(), teams, pull_requests.clone(), pull_requests)
}

/// Build an app serving every review endpoint over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(teams::add_team)
        .service(teams::get_team)
        .service(users::set_is_active)
        .service(users::get_reviews)
        .service(pull_requests::create_pull_request)
        .service(pull_requests::merge_pull_request)
        .service(pull_requests::reassign_reviewer)
        .service(stats::get_stats)
}
