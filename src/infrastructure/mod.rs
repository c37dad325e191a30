//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence and network probes.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`dns`] - TXT lookups for DNS ownership proofs
//! - [`http`] - HTTP client for file proofs and health probes

pub mod dns;
pub mod http;
pub mod persistence;
