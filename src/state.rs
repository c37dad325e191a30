//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{
    AuthService, DomainService, HealthService, VerificationService,
};
use crate::domain::probes::{HttpProbe, TxtResolver};
use crate::domain::repositories::{DomainRepository, HealthLogRepository, TokenRepository};

pub type AppDomainService = DomainService<dyn DomainRepository>;
pub type AppVerificationService =
    VerificationService<dyn DomainRepository, dyn TxtResolver, dyn HttpProbe>;
pub type AppHealthService =
    HealthService<dyn DomainRepository, dyn HealthLogRepository, dyn HttpProbe>;
pub type AppAuthService = AuthService<dyn TokenRepository>;

/// Services shared by all handlers.
///
/// Services are built over trait objects, so the server wires PostgreSQL,
/// hickory and reqwest implementations while tests wire in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    pub domain_service: Arc<AppDomainService>,
    pub verification_service: Arc<AppVerificationService>,
    pub health_service: Arc<AppHealthService>,
    pub auth_service: Arc<AppAuthService>,
}

impl AppState {
    pub fn new(
        domains: Arc<dyn DomainRepository>,
        health_logs: Arc<dyn HealthLogRepository>,
        tokens: Arc<dyn TokenRepository>,
        resolver: Arc<dyn TxtResolver>,
        http: Arc<dyn HttpProbe>,
        signing_secret: String,
    ) -> Self {
        Self {
            domain_service: Arc::new(DomainService::new(domains.clone())),
            verification_service: Arc::new(VerificationService::new(
                domains.clone(),
                resolver,
                http.clone(),
            )),
            health_service: Arc::new(HealthService::new(domains, health_logs, http)),
            auth_service: Arc::new(AuthService::new(tokens, signing_secret)),
        }
    }
}
