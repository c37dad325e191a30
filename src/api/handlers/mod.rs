//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod domain_health;
pub mod domains;
pub mod health;
pub mod verify;

pub use domain_health::{check_health_handler, health_logs_handler};
pub use domains::{create_domain_handler, domain_list_handler, get_domain_handler};
pub use health::health_handler;
pub use verify::{verify_dns_handler, verify_domain_handler, verify_file_handler};
