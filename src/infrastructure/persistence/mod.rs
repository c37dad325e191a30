//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries mapped through `FromRow` structs.
//!
//! Queries are checked by the `#[sqlx::test]` suites rather than by
//! `sqlx::query!`, so building the crate needs neither `DATABASE_URL` nor
//! `.sqlx` offline data.
//!
//! # Repositories
//!
//! - [`PgDomainRepository`] - Domain registration, lookup and verification state
//! - [`PgHealthLogRepository`] - Health probe history (transactional writes)
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_domain_repository;
pub mod pg_health_log_repository;
pub mod pg_token_repository;

pub use pg_domain_repository::PgDomainRepository;
pub use pg_health_log_repository::PgHealthLogRepository;
pub use pg_token_repository::PgTokenRepository;
