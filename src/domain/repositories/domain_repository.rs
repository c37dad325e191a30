//! Repository trait for domain records.

use crate::domain::entities::{Domain, NewDomain, VerificationStatus};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository interface for registered domains.
///
/// Lookups that serve a caller are scoped by owning user: a record owned by
/// someone else is indistinguishable from a missing one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgDomainRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_domain.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DomainRepository: Send + Sync {
    /// Inserts a new domain in the `pending` state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the hostname is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError>;

    /// Finds a domain by hostname across all users.
    ///
    /// Used for the availability check before registration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, domain: &str) -> Result<Option<Domain>, AppError>;

    /// Finds a domain by id, visible only to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<Domain>, AppError>;

    /// Lists a user's domains, newest first.
    ///
    /// # Arguments
    ///
    /// - `search` - If set, keeps only hostnames containing this text (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        search: Option<String>,
    ) -> Result<Vec<Domain>, AppError>;

    /// Lists every domain. Used by the scheduled health sweep.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_all(&self) -> Result<Vec<Domain>, AppError>;

    /// Overwrites the verification status fields of an owned domain.
    ///
    /// The write uses the same `(id, user_id)` filter as the read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matched the filter.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_verification(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: VerificationStatus,
        last_verified_at: Option<DateTime<Utc>>,
    ) -> Result<(), AppError>;

    /// Checks that the record store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
