//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without I/O. Persistence lives behind
//! the traits in [`crate::domain::repositories`].
//!
//! # Entity Types
//!
//! - [`Domain`] - A website registered by a user for verification and monitoring
//! - [`HealthLog`] - One append-only health probe record
//!
//! # Design Pattern
//!
//! Separate structs describe writes:
//! - `NewDomain` - For registering a domain
//! - `HealthCheckRecord` - For recording a probe (domain update + log row)

pub mod domain;
pub mod health_log;

pub use domain::{
    Domain, DomainSettings, IndexingFrequency, NewDomain, UnknownVariant, VerificationMethod,
    VerificationStatus,
};
pub use health_log::{HealthCheckRecord, HealthCheckResult, HealthLog};
