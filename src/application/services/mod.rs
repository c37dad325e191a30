//! Business logic services for the application layer.

pub mod auth_service;
pub mod domain_service;
pub mod health_service;
pub mod verification_service;

pub use auth_service::{AuthService, AuthenticatedUser, hash_token};
pub use domain_service::DomainService;
pub use health_service::{HealthHistory, HealthService, HealthSummary, SweepReport};
pub use verification_service::{DnsCheck, FileCheck, VerificationOutcome, VerificationService};
