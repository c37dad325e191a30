//! Domain registration and lookup service.

use crate::domain::entities::{Domain, DomainSettings, NewDomain, VerificationMethod};
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;
use crate::utils::hostname::normalize_hostname;
use crate::utils::verification_token::generate_verification_token;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Service for registering and reading a user's domains.
///
/// Handles:
/// - Hostname normalization and validation
/// - Global availability check before insert
/// - Verification token generation
pub struct DomainService<R: DomainRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: DomainRepository + ?Sized> DomainService<R> {
    /// Creates a new domain service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Registers a domain for a user.
    ///
    /// The hostname is trimmed and lowercased, checked against the hostname
    /// grammar, and checked for availability across all users. The new record
    /// starts `pending`, healthy, with default settings and a fresh
    /// verification token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the hostname is invalid.
    /// Returns [`AppError::Conflict`] if the hostname is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn add_domain(
        &self,
        user_id: Uuid,
        domain: &str,
        verification_method: VerificationMethod,
    ) -> Result<Domain, AppError> {
        let domain = normalize_hostname(domain)?;

        if self.repository.find_by_name(&domain).await?.is_some() {
            return Err(AppError::conflict(
                "This domain is already registered",
                json!({"domain": domain}),
            ));
        }

        let new_domain = NewDomain {
            user_id,
            domain: domain.clone(),
            verification_method,
            verification_token: generate_verification_token(),
            settings: DomainSettings::default(),
        };

        // The availability check is not transactional; a concurrent insert
        // surfaces as a unique violation, mapped to the same conflict.
        let created = self.repository.create(new_domain).await.map_err(|e| match e {
            AppError::Conflict { .. } => AppError::conflict(
                "This domain is already registered",
                json!({"domain": domain}),
            ),
            other => other,
        })?;

        tracing::info!(
            domain = %created.domain,
            domain_id = %created.id,
            method = %created.verification_method,
            "Domain registered"
        );

        Ok(created)
    }

    /// Lists the caller's domains, newest first.
    ///
    /// # Arguments
    ///
    /// - `search` - Optional case-insensitive substring filter on the hostname;
    ///   blank values are ignored
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_domains(
        &self,
        user_id: Uuid,
        search: Option<String>,
    ) -> Result<Vec<Domain>, AppError> {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        self.repository.list_by_user(user_id, search).await
    }

    /// Retrieves one of the caller's domains.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no domain with this id is owned by the caller.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_domain(&self, user_id: Uuid, domain_id: Uuid) -> Result<Domain, AppError> {
        self.repository
            .find_owned(domain_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({"id": domain_id})))
    }

    /// Checks that the record store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
