//! PR reviewer assignment service library.
//!
//! Layout follows a hexagonal split: [`domain`] holds the model, assignment
//! policy and ports; [`outbound`] implements the repository ports for
//! PostgreSQL and memory; [`inbound`] exposes the HTTP API.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
