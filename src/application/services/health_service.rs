//! Health sampling and health history.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::domain::entities::{Domain, HealthCheckRecord, HealthCheckResult, HealthLog};
use crate::domain::probes::HttpProbe;
use crate::domain::repositories::{DomainRepository, HealthLogRepository};
use crate::error::AppError;
use crate::utils::probe_url::health_check_url;

const DEFAULT_HISTORY_LIMIT: u32 = 100;
const MAX_HISTORY_LIMIT: u32 = 500;

/// Aggregates over a window of health logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthSummary {
    pub checks: usize,
    pub healthy_checks: usize,
    pub uptime_percent: f64,
    pub avg_response_time_ms: Option<f64>,
}

impl HealthSummary {
    /// Computes the summary of `logs`.
    ///
    /// Average response time only counts healthy probes; unreachable probes
    /// record 0 ms and would skew it.
    pub fn from_logs(logs: &[HealthLog]) -> Self {
        let checks = logs.len();
        let healthy: Vec<&HealthLog> = logs.iter().filter(|l| l.is_healthy).collect();
        let healthy_checks = healthy.len();

        let uptime_percent = if checks == 0 {
            0.0
        } else {
            healthy_checks as f64 / checks as f64 * 100.0
        };

        let avg_response_time_ms = if healthy.is_empty() {
            None
        } else {
            let total: i64 = healthy.iter().map(|l| i64::from(l.response_time)).sum();
            Some(total as f64 / healthy_checks as f64)
        };

        Self {
            checks,
            healthy_checks,
            uptime_percent,
            avg_response_time_ms,
        }
    }
}

/// Recent health logs of a domain with their summary.
#[derive(Debug, Clone)]
pub struct HealthHistory {
    pub summary: HealthSummary,
    pub logs: Vec<HealthLog>,
}

/// Totals of one sweep over every domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub checked: usize,
    pub healthy: usize,
    pub unhealthy: usize,
    /// Domains whose result could not be recorded.
    pub failed: usize,
}

/// Health Sampler.
///
/// Probes a domain with a single HEAD request, then records the result on the
/// domain and in its health log.
pub struct HealthService<R, L, H>
where
    R: DomainRepository + ?Sized,
    L: HealthLogRepository + ?Sized,
    H: HttpProbe + ?Sized,
{
    domains: Arc<R>,
    logs: Arc<L>,
    http: Arc<H>,
}

impl<R, L, H> HealthService<R, L, H>
where
    R: DomainRepository + ?Sized,
    L: HealthLogRepository + ?Sized,
    H: HttpProbe + ?Sized,
{
    pub fn new(domains: Arc<R>, logs: Arc<L>, http: Arc<H>) -> Self {
        Self {
            domains,
            logs,
            http,
        }
    }

    /// Probes one of the caller's domains and records the result.
    ///
    /// Network failures are part of the result (`status_code = 0`,
    /// `is_healthy = false`). The domain update and the log row are written
    /// together or not at all.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the caller owns no domain with this id.
    /// Returns [`AppError::Internal`] if the result could not be recorded.
    pub async fn check_health(
        &self,
        domain_id: Uuid,
        user_id: Uuid,
    ) -> Result<HealthCheckResult, AppError> {
        let domain = self
            .domains
            .find_owned(domain_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({"id": domain_id})))?;

        self.sample(&domain).await
    }

    /// Probes a hostname without recording anything.
    pub async fn probe(&self, domain: &str) -> HealthCheckResult {
        let url = match health_check_url(domain) {
            Ok(url) => url,
            Err(e) => return HealthCheckResult::unreachable(format!("Invalid URL: {e}")),
        };

        let started = Instant::now();
        let result = match self.http.head(url.as_str()).await {
            Ok(status) => {
                let elapsed = started.elapsed().as_millis();
                HealthCheckResult::from_status(status, u64::try_from(elapsed).unwrap_or(u64::MAX))
            }
            Err(e) => HealthCheckResult::unreachable(e.to_string()),
        };

        metrics::counter!(
            "domain_health_checks_total",
            "healthy" => if result.is_healthy { "true" } else { "false" }
        )
        .increment(1);

        match &result.error {
            Some(error) => tracing::warn!(domain, error = %error, "Health probe failed"),
            None => tracing::debug!(
                domain,
                status_code = result.status_code,
                response_time_ms = result.response_time_ms,
                "Health probe completed"
            ),
        }

        result
    }

    /// Returns the caller's latest health logs for a domain, newest first.
    ///
    /// # Arguments
    ///
    /// - `limit` - Window size, 1-500 (default 100)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` is out of range.
    /// Returns [`AppError::NotFound`] if the caller owns no domain with this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn history(
        &self,
        user_id: Uuid,
        domain_id: Uuid,
        limit: Option<u32>,
    ) -> Result<HealthHistory, AppError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        if !(1..=MAX_HISTORY_LIMIT).contains(&limit) {
            return Err(AppError::bad_request(
                "Limit out of range",
                json!({"min": 1, "max": MAX_HISTORY_LIMIT, "provided": limit}),
            ));
        }

        let domain = self
            .domains
            .find_owned(domain_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Domain not found", json!({"id": domain_id})))?;

        let logs = self.logs.list_recent(domain.id, i64::from(limit)).await?;

        Ok(HealthHistory {
            summary: HealthSummary::from_logs(&logs),
            logs,
        })
    }

    /// Samples every registered domain once, sequentially.
    ///
    /// A domain whose result cannot be recorded is counted in
    /// [`SweepReport::failed`] and does not stop the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the domain list cannot be loaded.
    pub async fn sweep(&self) -> Result<SweepReport, AppError> {
        let domains = self.domains.list_all().await?;
        let mut report = SweepReport::default();

        for domain in &domains {
            match self.sample(domain).await {
                Ok(result) => {
                    report.checked += 1;
                    if result.is_healthy {
                        report.healthy += 1;
                    } else {
                        report.unhealthy += 1;
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    tracing::error!(domain = %domain.domain, error = %e, "Failed to record health check");
                }
            }
        }

        tracing::info!(
            checked = report.checked,
            healthy = report.healthy,
            unhealthy = report.unhealthy,
            failed = report.failed,
            "Health sweep finished"
        );

        Ok(report)
    }

    async fn sample(&self, domain: &Domain) -> Result<HealthCheckResult, AppError> {
        let result = self.probe(&domain.domain).await;

        self.logs
            .record_check(HealthCheckRecord {
                domain_id: domain.id,
                user_id: domain.user_id,
                checked_at: Utc::now(),
                result: result.clone(),
            })
            .await?;

        Ok(result)
    }
}
