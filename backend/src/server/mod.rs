//! Server construction and middleware wiring.

mod config;

pub use config::{CONNECT_RETRY_DELAY, ReviewBackend, ServerConfig, ServiceSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use pr_reviewer::Trace;
#[cfg(debug_assertions)]
use pr_reviewer::doc::ApiDoc;
use pr_reviewer::domain::{PullRequestService, ReviewerSelector, TeamService};
use pr_reviewer::inbound::http::error::{json_error_handler, query_error_handler};
use pr_reviewer::inbound::http::health::{HealthState, health, live, ready};
use pr_reviewer::inbound::http::pull_requests::{
    create_pull_request, merge_pull_request, reassign_reviewer,
};
use pr_reviewer::inbound::http::state::HttpState;
use pr_reviewer::inbound::http::stats::get_stats;
use pr_reviewer::inbound::http::teams::{add_team, get_team};
use pr_reviewer::inbound::http::users::{get_reviews, set_is_active};
use pr_reviewer::outbound::memory::InMemoryReviewStore;
use pr_reviewer::outbound::persistence::{DbPool, DieselPullRequestRepository, DieselTeamRepository};

fn postgres_state(pool: &DbPool, selector: Arc<dyn ReviewerSelector>) -> HttpState {
    let teams = Arc::new(TeamService::new(Arc::new(DieselTeamRepository::new(
        pool.clone(),
    ))));
    let pull_requests = Arc::new(PullRequestService::new(Arc::new(
        DieselPullRequestRepository::new(pool.clone(), selector),
    )));
    HttpState::new(teams.clone(), teams, pull_requests.clone(), pull_requests)
}

fn in_memory_state(selector: Arc<dyn ReviewerSelector>) -> HttpState {
    let store = Arc::new(InMemoryReviewStore::new(selector));
    let teams = Arc::new(TeamService::new(store.clone()));
    let pull_requests = Arc::new(PullRequestService::new(store));
    HttpState::new(teams.clone(), teams, pull_requests.clone(), pull_requests)
}

/// Build the handler state for the configured backend.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.backend {
        ReviewBackend::Postgres(pool) => {
            info!("serving reviews from PostgreSQL");
            postgres_state(pool, config.selector.clone())
        }
        ReviewBackend::InMemory => {
            info!("serving reviews from the in-memory store");
            in_memory_state(config.selector.clone())
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(add_team)
        .service(get_team)
        .service(set_is_active)
        .service(get_reviews)
        .service(create_pull_request)
        .service(merge_pull_request)
        .service(reassign_reviewer)
        .service(get_stats)
        .service(health)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
