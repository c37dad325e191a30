//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository and
//! probe calls, validation, and business rules. Services consume traits and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::domain_service::DomainService`] - Domain registration and lookup
//! - [`services::verification_service::VerificationService`] - DNS / file ownership proofs
//! - [`services::health_service::HealthService`] - Health probes and history
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
