use bing_index::domain::entities::{
    DomainSettings, HealthCheckRecord, HealthCheckResult, NewDomain, VerificationMethod,
};
use bing_index::domain::repositories::{DomainRepository, HealthLogRepository};
use bing_index::error::AppError;
use bing_index::infrastructure::persistence::{PgDomainRepository, PgHealthLogRepository};
use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

async fn seed_domain(pool: &Arc<PgPool>, user_id: Uuid) -> Uuid {
    PgDomainRepository::new(pool.clone())
        .create(NewDomain {
            user_id,
            domain: "example.com".to_string(),
            verification_method: VerificationMethod::File,
            verification_token: "abc123".to_string(),
            settings: DomainSettings::default(),
        })
        .await
        .unwrap()
        .id
}

fn record(domain_id: Uuid, user_id: Uuid, result: HealthCheckResult) -> HealthCheckRecord {
    HealthCheckRecord {
        domain_id,
        user_id,
        checked_at: Utc::now(),
        result,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_record_check_updates_domain_and_appends_log(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = Uuid::new_v4();
    let domain_id = seed_domain(&pool, owner).await;
    let repo = PgHealthLogRepository::new(pool.clone());

    let log = repo
        .record_check(record(
            domain_id,
            owner,
            HealthCheckResult::unreachable("connection refused"),
        ))
        .await
        .unwrap();

    assert_eq!(log.domain_id, domain_id);
    assert_eq!(log.status_code, 0);
    assert!(!log.is_healthy);
    assert_eq!(log.error_message.as_deref(), Some("connection refused"));

    let domain = PgDomainRepository::new(pool)
        .find_owned(domain_id, owner)
        .await
        .unwrap()
        .unwrap();
    assert!(!domain.is_healthy);
    assert!(domain.last_health_check.is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_record_check_wrong_owner_writes_nothing(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = Uuid::new_v4();
    let domain_id = seed_domain(&pool, owner).await;
    let repo = PgHealthLogRepository::new(pool.clone());

    let result = repo
        .record_check(record(
            domain_id,
            Uuid::new_v4(),
            HealthCheckResult::from_status(200, 12),
        ))
        .await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
    assert!(repo.list_recent(domain_id, 10).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_recent_newest_first_with_limit(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = Uuid::new_v4();
    let domain_id = seed_domain(&pool, owner).await;
    let repo = PgHealthLogRepository::new(pool);

    for status in [200, 503, 204] {
        repo.record_check(record(
            domain_id,
            owner,
            HealthCheckResult::from_status(status, 40),
        ))
        .await
        .unwrap();
    }

    let logs = repo.list_recent(domain_id, 2).await.unwrap();

    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0].status_code, 204);
    assert_eq!(logs[1].status_code, 503);
}
