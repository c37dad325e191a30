//! Health log entity and the probe result it records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Result of a single health probe.
///
/// A probe that could not connect at all is recorded with `status_code = 0`,
/// `response_time_ms = 0`, and the failure message in `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckResult {
    pub status_code: u16,
    pub response_time_ms: u64,
    pub is_healthy: bool,
    pub error: Option<String>,
}

impl HealthCheckResult {
    /// Builds the result for a probe that received a response.
    pub fn from_status(status_code: u16, response_time_ms: u64) -> Self {
        Self {
            status_code,
            response_time_ms,
            is_healthy: (200..300).contains(&status_code),
            error: None,
        }
    }

    /// Builds the result for a probe that failed before a response arrived.
    pub fn unreachable(error: impl Into<String>) -> Self {
        Self {
            status_code: 0,
            response_time_ms: 0,
            is_healthy: false,
            error: Some(error.into()),
        }
    }
}

/// One persisted probe. Append-only.
#[derive(Debug, Clone)]
pub struct HealthLog {
    pub id: i64,
    pub domain_id: Uuid,
    pub status_code: i32,
    pub response_time: i32,
    pub is_healthy: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Everything written when a probe completes: the domain's rolling health
/// fields and one new log row.
#[derive(Debug, Clone)]
pub struct HealthCheckRecord {
    pub domain_id: Uuid,
    pub user_id: Uuid,
    pub checked_at: DateTime<Utc>,
    pub result: HealthCheckResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_success_range() {
        assert!(HealthCheckResult::from_status(200, 10).is_healthy);
        assert!(HealthCheckResult::from_status(204, 10).is_healthy);
        assert!(HealthCheckResult::from_status(299, 10).is_healthy);
    }

    #[test]
    fn test_from_status_outside_success_range() {
        assert!(!HealthCheckResult::from_status(301, 10).is_healthy);
        assert!(!HealthCheckResult::from_status(404, 10).is_healthy);
        assert!(!HealthCheckResult::from_status(503, 10).is_healthy);
        assert!(HealthCheckResult::from_status(503, 10).error.is_none());
    }

    #[test]
    fn test_unreachable() {
        let result = HealthCheckResult::unreachable("connection refused");

        assert_eq!(result.status_code, 0);
        assert_eq!(result.response_time_ms, 0);
        assert!(!result.is_healthy);
        assert_eq!(result.error.as_deref(), Some("connection refused"));
    }
}
