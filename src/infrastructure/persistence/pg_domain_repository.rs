//! PostgreSQL implementation of domain repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Domain, DomainSettings, NewDomain, VerificationStatus};
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;
use serde_json::json;

const DOMAIN_COLUMNS: &str = "id, user_id, domain, verification_method, verification_token, \
     verification_status, last_verified_at, last_health_check, is_healthy, settings, created_at";

#[derive(sqlx::FromRow)]
struct DomainRow {
    id: Uuid,
    user_id: Uuid,
    domain: String,
    verification_method: String,
    verification_token: String,
    verification_status: String,
    last_verified_at: Option<DateTime<Utc>>,
    last_health_check: Option<DateTime<Utc>>,
    is_healthy: bool,
    settings: Json<DomainSettings>,
    created_at: DateTime<Utc>,
}

impl TryFrom<DomainRow> for Domain {
    type Error = AppError;

    fn try_from(row: DomainRow) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::domain::entities::UnknownVariant| {
            AppError::internal(
                "Corrupt domain record",
                json!({"id": row.id, "reason": e.to_string()}),
            )
        };

        Ok(Domain {
            id: row.id,
            user_id: row.user_id,
            verification_method: row.verification_method.parse().map_err(corrupt)?,
            verification_status: row.verification_status.parse().map_err(corrupt)?,
            domain: row.domain,
            verification_token: row.verification_token,
            last_verified_at: row.last_verified_at,
            last_health_check: row.last_health_check,
            is_healthy: row.is_healthy,
            settings: row.settings.0,
            created_at: row.created_at,
        })
    }
}

/// PostgreSQL repository for registered domains.
///
/// Every read and write used on behalf of a caller filters by
/// `(id, user_id)`; a record owned by someone else behaves as missing.
pub struct PgDomainRepository {
    pool: Arc<PgPool>,
}

impl PgDomainRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DomainRepository for PgDomainRepository {
    async fn create(&self, new_domain: NewDomain) -> Result<Domain, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            r#"
            INSERT INTO domains (id, user_id, domain, verification_method, verification_token, settings)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {DOMAIN_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new_domain.user_id)
        .bind(&new_domain.domain)
        .bind(new_domain.verification_method.as_str())
        .bind(&new_domain.verification_token)
        .bind(Json(&new_domain.settings))
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_name(&self, domain: &str) -> Result<Option<Domain>, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM domains WHERE domain = $1"
        ))
        .bind(domain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Domain::try_from).transpose()
    }

    async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Option<Domain>, AppError> {
        let row = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM domains WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Domain::try_from).transpose()
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        search: Option<String>,
    ) -> Result<Vec<Domain>, AppError> {
        let rows = sqlx::query_as::<_, DomainRow>(&format!(
            r#"
            SELECT {DOMAIN_COLUMNS}
            FROM domains
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR strpos(lower(domain), lower($2)) > 0)
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(search)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Domain::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Domain>, AppError> {
        let rows = sqlx::query_as::<_, DomainRow>(&format!(
            "SELECT {DOMAIN_COLUMNS} FROM domains ORDER BY created_at"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Domain::try_from).collect()
    }

    async fn update_verification(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: VerificationStatus,
        last_verified_at: Option<DateTime<Utc>>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE domains
            SET verification_status = $3, last_verified_at = $4
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(status.as_str())
        .bind(last_verified_at)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Domain not found or unauthorized",
                json!({"id": id}),
            ));
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
