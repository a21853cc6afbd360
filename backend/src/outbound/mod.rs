//! Outbound adapters implementing domain ports for storage.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel.
//! - **memory**: process-local store used when no database is configured.
//!
//! Adapters convert between domain types and storage representations and
//! delegate reviewer eligibility to the domain assignment policy.

pub mod memory;
pub mod persistence;
