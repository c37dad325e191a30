#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, middleware, routing::get};
use axum_test::TestServer;
use bing_index::api::handlers::health_handler;
use bing_index::api::middleware::auth;
use bing_index::api::routes::protected_routes;
use bing_index::application::services::hash_token;
use bing_index::domain::entities::{
    Domain, DomainSettings, HealthCheckRecord, HealthLog, NewDomain, VerificationMethod,
    VerificationStatus,
};
use bing_index::domain::probes::{HttpProbe, HttpResponse, ProbeError, TxtResolver};
use bing_index::domain::repositories::{
    ApiToken, DomainRepository, HealthLogRepository, TokenRepository,
};
use bing_index::error::AppError;
use bing_index::state::AppState;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";
pub const OTHER_BEARER: &str = "Bearer other-token";

// ─── Fakes ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryDomains {
    pub domains: Mutex<Vec<Domain>>,
    pub ping_fails: AtomicBool,
}

impl InMemoryDomains {
    pub fn get(&self, id: Uuid) -> Option<Domain> {
        self.domains.lock().unwrap().iter().find(|d| d.id == id).cloned()
    }

    pub fn insert(&self, domain: Domain) {
        self.domains.lock().unwrap().push(domain);
    }
}

#[async_trait]
impl DomainRepository for InMemoryDomains {
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError> {
        let mut domains = self.domains.lock().unwrap();
        if domains.iter().any(|d| d.domain == new_domain.domain) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({"constraint": "domains_domain_key"}),
            ));
        }

        let domain = Domain {
            id: Uuid::new_v4(),
            user_id: new_domain.user_id,
            domain: new_domain.domain,
            verification_method: new_domain.verification_method,
            verification_token: new_domain.verification_token,
            verification_status: VerificationStatus::Pending,
            last_verified_at: None,
            last_health_check: None,
            is_healthy: true,
            settings: new_domain.settings,
            created_at: Utc::now(),
        };
        domains.push(domain.clone());

        Ok(domain)
    }

    async fn find_by_name(&self, domain: &str) -> Result<Option<Domain>, AppError> {
        Ok(self
            .domains
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.domain == domain)
            .cloned())
    }

    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<Domain>, AppError> {
        Ok(self.get(id).filter(|d| d.user_id == user_id))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        search: Option<String>,
    ) -> Result<Vec<Domain>, AppError> {
        let mut items: Vec<Domain> = self
            .domains
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user_id == user_id)
            .filter(|d| search.as_ref().is_none_or(|s| d.domain.contains(s.as_str())))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(items)
    }

    async fn list_all(&self) -> Result<Vec<Domain>, AppError> {
        Ok(self.domains.lock().unwrap().clone())
    }

    async fn update_verification(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: VerificationStatus,
        last_verified_at: Option<DateTime<Utc>>,
    ) -> Result<(), AppError> {
        let mut domains = self.domains.lock().unwrap();
        let domain = domains
            .iter_mut()
            .find(|d| d.id == id && d.user_id == user_id)
            .ok_or_else(|| AppError::not_found("Domain not found or unauthorized", json!({})))?;

        domain.verification_status = status;
        domain.last_verified_at = last_verified_at;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.ping_fails.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

/// Health log store that also updates the shared domain records.
pub struct InMemoryHealthLogs {
    pub domains: Arc<InMemoryDomains>,
    pub logs: Mutex<Vec<HealthLog>>,
}

impl InMemoryHealthLogs {
    pub fn new(domains: Arc<InMemoryDomains>) -> Self {
        Self {
            domains,
            logs: Mutex::new(Vec::new()),
        }
    }

    pub fn count_for(&self, domain_id: Uuid) -> usize {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.domain_id == domain_id)
            .count()
    }
}

#[async_trait]
impl HealthLogRepository for InMemoryHealthLogs {
    async fn record_check(&self, record: HealthCheckRecord) -> Result<HealthLog, AppError> {
        {
            let mut domains = self.domains.domains.lock().unwrap();
            let domain = domains
                .iter_mut()
                .find(|d| d.id == record.domain_id && d.user_id == record.user_id)
                .ok_or_else(|| AppError::not_found("Domain not found", json!({})))?;
            domain.is_healthy = record.result.is_healthy;
            domain.last_health_check = Some(record.checked_at);
        }

        let mut logs = self.logs.lock().unwrap();
        let log = HealthLog {
            id: logs.len() as i64 + 1,
            domain_id: record.domain_id,
            status_code: i32::from(record.result.status_code),
            response_time: record.result.response_time_ms as i32,
            is_healthy: record.result.is_healthy,
            error_message: record.result.error,
            created_at: record.checked_at,
        };
        logs.push(log.clone());

        Ok(log)
    }

    async fn list_recent(&self, domain_id: Uuid, limit: i64) -> Result<Vec<HealthLog>, AppError> {
        Ok(self
            .logs
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|l| l.domain_id == domain_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

/// Token store keyed by hash.
#[derive(Default)]
pub struct InMemoryTokens {
    pub owners: Mutex<HashMap<String, Uuid>>,
}

#[async_trait]
impl TokenRepository for InMemoryTokens {
    async fn find_active_owner(&self, token_hash: &str) -> Result<Option<Uuid>, AppError> {
        Ok(self.owners.lock().unwrap().get(token_hash).copied())
    }

    async fn update_last_used(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_token(
        &self,
        user_id: Uuid,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        self.owners
            .lock()
            .unwrap()
            .insert(token_hash.to_string(), user_id);

        Ok(ApiToken {
            id: 1,
            user_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        })
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn revoke_token(&self, _id: i64) -> Result<(), AppError> {
        Ok(())
    }
}

/// Resolver answering from a fixed zone table. Unknown names are NXDOMAIN.
#[derive(Default)]
pub struct StaticResolver {
    pub zones: Mutex<HashMap<String, Result<Vec<String>, ProbeError>>>,
    pub lookups: Mutex<Vec<String>>,
}

impl StaticResolver {
    pub fn set(&self, name: &str, answer: Result<Vec<String>, ProbeError>) {
        self.zones.lock().unwrap().insert(name.to_string(), answer);
    }
}

#[async_trait]
impl TxtResolver for StaticResolver {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ProbeError> {
        self.lookups.lock().unwrap().push(name.to_string());
        self.zones
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(ProbeError::NxDomain(name.to_string())))
    }
}

/// HTTP probe answering from fixed tables. Unknown URLs fail to connect.
#[derive(Default)]
pub struct StaticHttp {
    pub pages: Mutex<HashMap<String, Result<HttpResponse, ProbeError>>>,
    pub heads: Mutex<HashMap<String, Result<u16, ProbeError>>>,
}

impl StaticHttp {
    pub fn set_page(&self, url: &str, status: u16, body: &str) {
        self.pages.lock().unwrap().insert(
            url.to_string(),
            Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
    }

    pub fn set_head(&self, url: &str, answer: Result<u16, ProbeError>) {
        self.heads.lock().unwrap().insert(url.to_string(), answer);
    }
}

#[async_trait]
impl HttpProbe for StaticHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProbeError> {
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(ProbeError::Connect("connection refused".to_string())))
    }

    async fn head(&self, url: &str) -> Result<u16, ProbeError> {
        self.heads
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(ProbeError::Connect("connection refused".to_string())))
    }
}

// ─── Harness ─────────────────────────────────────────────────────────────────

pub struct TestContext {
    pub user_id: Uuid,
    pub other_user_id: Uuid,
    pub domains: Arc<InMemoryDomains>,
    pub health_logs: Arc<InMemoryHealthLogs>,
    pub resolver: Arc<StaticResolver>,
    pub http: Arc<StaticHttp>,
    pub state: AppState,
}

impl TestContext {
    /// Two users, each holding one token: `BEARER` and `OTHER_BEARER`.
    pub fn new() -> Self {
        let user_id = Uuid::new_v4();
        let other_user_id = Uuid::new_v4();

        let domains = Arc::new(InMemoryDomains::default());
        let health_logs = Arc::new(InMemoryHealthLogs::new(domains.clone()));
        let tokens = Arc::new(InMemoryTokens::default());
        let resolver = Arc::new(StaticResolver::default());
        let http = Arc::new(StaticHttp::default());

        {
            let mut owners = tokens.owners.lock().unwrap();
            owners.insert(hash_token(SIGNING_SECRET, TOKEN), user_id);
            owners.insert(hash_token(SIGNING_SECRET, "other-token"), other_user_id);
        }

        let state = AppState::new(
            domains.clone(),
            health_logs.clone(),
            tokens,
            resolver.clone(),
            http.clone(),
            SIGNING_SECRET.to_string(),
        );

        Self {
            user_id,
            other_user_id,
            domains,
            health_logs,
            resolver,
            http,
            state,
        }
    }

    /// Routes as mounted by the server, without rate limiting.
    pub fn server(&self) -> TestServer {
        let api = protected_routes().route_layer(middleware::from_fn_with_state(
            self.state.clone(),
            auth::layer,
        ));

        let app = Router::new()
            .route("/health", get(health_handler))
            .nest("/api", api)
            .with_state(self.state.clone());

        TestServer::new(app).unwrap()
    }

    /// Stores a pending domain owned by `user_id`.
    pub fn add_domain(
        &self,
        user_id: Uuid,
        name: &str,
        method: VerificationMethod,
        token: &str,
    ) -> Domain {
        let domain = Domain {
            id: Uuid::new_v4(),
            user_id,
            domain: name.to_string(),
            verification_method: method,
            verification_token: token.to_string(),
            verification_status: VerificationStatus::Pending,
            last_verified_at: None,
            last_health_check: None,
            is_healthy: true,
            settings: DomainSettings::default(),
            created_at: Utc::now(),
        };
        self.domains.insert(domain.clone());
        domain
    }
}
