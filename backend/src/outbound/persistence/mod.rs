//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the team and pull request repository ports
//! backed by PostgreSQL through `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories translate between Diesel rows and domain
//!   types; eligibility rules stay in [`crate::domain::assignment`].
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One transaction per mutation**: multi-step writes run inside
//!   `AsyncConnection::transaction`, locking pull request rows with
//!   `FOR UPDATE` where concurrent writers must serialise.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pr_reviewer::domain::RandomReviewerSelector;
//! use pr_reviewer::outbound::persistence::{
//!     DbPool, DieselPullRequestRepository, DieselTeamRepository, PoolConfig,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/reviews")).await?;
//! let teams = DieselTeamRepository::new(pool.clone());
//! let pull_requests = DieselPullRequestRepository::new(pool, Arc::new(RandomReviewerSelector));
//! # let _ = (teams, pull_requests);
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_pull_request_repository;
mod diesel_team_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_pull_request_repository::DieselPullRequestRepository;
pub use diesel_team_repository::DieselTeamRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, redacted_database_url};
