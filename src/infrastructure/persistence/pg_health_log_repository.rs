//! PostgreSQL implementation of health log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{HealthCheckRecord, HealthLog};
use crate::domain::repositories::HealthLogRepository;
use crate::error::AppError;
use serde_json::json;

#[derive(sqlx::FromRow)]
struct HealthLogRow {
    id: i64,
    domain_id: Uuid,
    status_code: i32,
    response_time: i32,
    is_healthy: bool,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<HealthLogRow> for HealthLog {
    fn from(row: HealthLogRow) -> Self {
        HealthLog {
            id: row.id,
            domain_id: row.domain_id,
            status_code: row.status_code,
            response_time: row.response_time,
            is_healthy: row.is_healthy,
            error_message: row.error_message,
            created_at: row.created_at,
        }
    }
}

fn stage_error(stage: &'static str, domain_id: Uuid, e: sqlx::Error) -> AppError {
    tracing::error!(stage, domain_id = %domain_id, error = %e, "Health check write failed");

    AppError::internal(
        "Failed to record health check",
        json!({"stage": stage, "domain_id": domain_id}),
    )
}

/// PostgreSQL repository for health probe history.
///
/// The domain update and the log insert share one transaction.
pub struct PgHealthLogRepository {
    pool: Arc<PgPool>,
}

impl PgHealthLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthLogRepository for PgHealthLogRepository {
    async fn record_check(&self, record: HealthCheckRecord) -> Result<HealthLog, AppError> {
        let domain_id = record.domain_id;
        let result = &record.result;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| stage_error("begin", domain_id, e))?;

        let updated = sqlx::query(
            r#"
            UPDATE domains
            SET is_healthy = $3, last_health_check = $4
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(domain_id)
        .bind(record.user_id)
        .bind(result.is_healthy)
        .bind(record.checked_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| stage_error("update_domain", domain_id, e))?;

        if updated.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| stage_error("rollback", domain_id, e))?;
            return Err(AppError::not_found(
                "Domain not found",
                json!({"id": domain_id}),
            ));
        }

        let response_time = i32::try_from(result.response_time_ms).unwrap_or(i32::MAX);

        let row = sqlx::query_as::<_, HealthLogRow>(
            r#"
            INSERT INTO domain_health_logs
                (domain_id, status_code, response_time, is_healthy, error_message, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, domain_id, status_code, response_time, is_healthy, error_message, created_at
            "#,
        )
        .bind(domain_id)
        .bind(i32::from(result.status_code))
        .bind(response_time)
        .bind(result.is_healthy)
        .bind(result.error.as_deref())
        .bind(record.checked_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| stage_error("insert_log", domain_id, e))?;

        tx.commit()
            .await
            .map_err(|e| stage_error("commit", domain_id, e))?;

        Ok(row.into())
    }

    async fn list_recent(&self, domain_id: Uuid, limit: i64) -> Result<Vec<HealthLog>, AppError> {
        let rows = sqlx::query_as::<_, HealthLogRow>(
            r#"
            SELECT id, domain_id, status_code, response_time, is_healthy, error_message, created_at
            FROM domain_health_logs
            WHERE domain_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(domain_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(HealthLog::from).collect())
    }
}
