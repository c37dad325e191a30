//! Domain layer containing business entities and ports.
//!
//! This module defines entities, repository interfaces, and the probe ports
//! used to reach the outside world, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`probes`] - DNS and HTTP capabilities used by verification and health sampling
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Traits define contracts implemented by the infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod probes;
pub mod repositories;
