use bing_index::domain::repositories::TokenRepository;
use bing_index::error::AppError;
use bing_index::infrastructure::persistence::PgTokenRepository;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_token(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    let user_id = Uuid::new_v4();

    let token = repo.create_token(user_id, "ci", "hash123").await.unwrap();

    assert_eq!(token.user_id, user_id);
    assert_eq!(token.name, "ci");
    assert_eq!(token.token_hash, "hash123");
    assert!(token.revoked_at.is_none());
    assert!(token.last_used_at.is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_duplicate_name_is_conflict(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token(Uuid::new_v4(), "ci", "hash1").await.unwrap();
    let result = repo.create_token(Uuid::new_v4(), "ci", "hash2").await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_active_owner(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    let user_id = Uuid::new_v4();
    repo.create_token(user_id, "ci", "validhash").await.unwrap();

    assert_eq!(repo.find_active_owner("validhash").await.unwrap(), Some(user_id));
    assert_eq!(repo.find_active_owner("unknown").await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_revoked_token_has_no_owner(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    let token = repo
        .create_token(Uuid::new_v4(), "ci", "revokehash")
        .await
        .unwrap();

    repo.revoke_token(token.id).await.unwrap();

    assert_eq!(repo.find_active_owner("revokehash").await.unwrap(), None);
    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.revoked_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_last_used(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(Uuid::new_v4(), "ci", "usedhash")
        .await
        .unwrap();

    repo.update_last_used("usedhash").await.unwrap();

    let stored = repo.find_by_name("ci").await.unwrap().unwrap();
    assert!(stored.last_used_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_tokens(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));
    repo.create_token(Uuid::new_v4(), "one", "h1").await.unwrap();
    repo.create_token(Uuid::new_v4(), "two", "h2").await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();

    assert_eq!(tokens.len(), 2);
}
