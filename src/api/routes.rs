//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    check_health_handler, create_domain_handler, domain_list_handler, get_domain_handler,
    health_logs_handler, verify_dns_handler, verify_domain_handler, verify_file_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET  /domains`                  - List the caller's domains
/// - `POST /domains`                  - Register a domain
/// - `GET  /domains/{id}`             - Get one domain
/// - `GET  /domains/{id}/health-logs` - Recent health probes with summary
/// - `POST /domains/verify`           - Verify ownership of a stored domain
/// - `POST /domains/health`           - Probe a stored domain now
/// - `GET  /domains/verify/dns`       - DNS proof diagnostic (no writes)
/// - `GET  /domains/verify/file`      - File proof diagnostic (no writes)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/domains",
            get(domain_list_handler).post(create_domain_handler),
        )
        .route("/domains/verify", post(verify_domain_handler))
        .route("/domains/verify/dns", get(verify_dns_handler))
        .route("/domains/verify/file", get(verify_file_handler))
        .route("/domains/health", post(check_health_handler))
        .route("/domains/{id}", get(get_domain_handler))
        .route("/domains/{id}/health-logs", get(health_logs_handler))
}
