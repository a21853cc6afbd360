//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{PullRequestCommand, ReviewQuery, TeamCommand, TeamQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub teams: Arc<dyn TeamCommand>,
    pub teams_query: Arc<dyn TeamQuery>,
    pub pull_requests: Arc<dyn PullRequestCommand>,
    pub reviews: Arc<dyn ReviewQuery>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        teams: Arc<dyn TeamCommand>,
        teams_query: Arc<dyn TeamQuery>,
        pull_requests: Arc<dyn PullRequestCommand>,
        reviews: Arc<dyn ReviewQuery>,
    ) -> Self {
        Self {
            teams,
            teams_query,
            pull_requests,
            reviews,
        }
    }
}
