//! DTOs for health probes, health history and service liveness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::HealthSummary;
use crate::domain::entities::{HealthCheckResult, HealthLog};

/// Probe result as returned by `POST /api/domains/health`.
#[derive(Debug, Serialize)]
pub struct HealthResult {
    pub status_code: u16,
    /// Milliseconds.
    pub response_time: u64,
    pub is_healthy: bool,
    pub error: Option<String>,
}

impl From<HealthCheckResult> for HealthResult {
    fn from(r: HealthCheckResult) -> Self {
        HealthResult {
            status_code: r.status_code,
            response_time: r.response_time_ms,
            is_healthy: r.is_healthy,
            error: r.error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DomainHealthResponse {
    pub success: bool,
    pub health: HealthResult,
}

/// Query parameters for the health history.
///
/// Uses `serde_with` to parse the limit from the query string.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct HealthLogsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HealthLogItem {
    pub id: i64,
    pub status_code: i32,
    pub response_time: i32,
    pub is_healthy: bool,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<HealthLog> for HealthLogItem {
    fn from(l: HealthLog) -> Self {
        HealthLogItem {
            id: l.id,
            status_code: l.status_code,
            response_time: l.response_time,
            is_healthy: l.is_healthy,
            error_message: l.error_message,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthLogsResponse {
    pub summary: HealthSummary,
    pub items: Vec<HealthLogItem>,
}

/// Service liveness response with component status.
#[derive(Debug, Serialize)]
pub struct ServiceHealthResponse {
    pub status: String,
    pub version: String,
    pub checks: ServiceChecks,
}

/// Health status for each system component.
#[derive(Debug, Serialize)]
pub struct ServiceChecks {
    pub database: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
