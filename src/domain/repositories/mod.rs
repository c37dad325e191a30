//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the record store following the Repository pattern.
//! Concrete implementations live in `crate::infrastructure::persistence`.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Reads and writes on a user's records are scoped by `(id, user_id)`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`DomainRepository`] - Domain registration, lookup, and verification status
//! - [`HealthLogRepository`] - Health probe recording and history
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod domain_repository;
pub mod health_log_repository;
pub mod token_repository;

pub use domain_repository::DomainRepository;
pub use health_log_repository::HealthLogRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use domain_repository::MockDomainRepository;
#[cfg(test)]
pub use health_log_repository::MockHealthLogRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
