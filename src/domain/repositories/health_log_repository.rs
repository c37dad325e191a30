//! Repository trait for health probe records.

use crate::domain::entities::{HealthCheckRecord, HealthLog};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for health probe history.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgHealthLogRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthLogRepository: Send + Sync {
    /// Records a completed probe.
    ///
    /// Updates the domain's `is_healthy` and `last_health_check` (scoped by
    /// `(domain_id, user_id)`) and appends one log row as a single unit: either
    /// both writes apply or neither does.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain no longer matches the owner filter.
    /// Returns [`AppError::Internal`] naming the failed stage on database errors.
    async fn record_check(&self, record: HealthCheckRecord) -> Result<HealthLog, AppError>;

    /// Returns the most recent `limit` probes for a domain, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_recent(&self, domain_id: Uuid, limit: i64) -> Result<Vec<HealthLog>, AppError>;
}
