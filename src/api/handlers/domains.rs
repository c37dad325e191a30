//! Handlers for domain registration and lookup endpoints.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::domain::{
    CreateDomainRequest, DomainItem, DomainListResponse, ListDomainsQuery,
};
use crate::application::services::AuthenticatedUser;
use crate::domain::entities::VerificationMethod;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's domains, newest first.
///
/// # Endpoint
///
/// `GET /api/domains?search=<substring>`
pub async fn domain_list_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ListDomainsQuery>,
) -> Result<Json<DomainListResponse>, AppError> {
    let domains = state
        .domain_service
        .list_domains(user.user_id, query.search)
        .await?;

    Ok(Json(DomainListResponse {
        items: domains.into_iter().map(DomainItem::from).collect(),
    }))
}

/// Registers a domain for the caller.
///
/// # Endpoint
///
/// `POST /api/domains`
///
/// # Request Body
///
/// ```json
/// { "domain": "example.com", "verification_method": "dns" }
/// ```
///
/// # Errors
///
/// Returns 400 if the hostname or method is invalid.
/// Returns 409 if the hostname is already registered by anyone.
pub async fn create_domain_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateDomainRequest>,
) -> Result<(StatusCode, Json<DomainItem>), AppError> {
    payload.validate()?;

    let method: VerificationMethod = payload.verification_method.parse().map_err(|_| {
        AppError::bad_request(
            "Invalid verification method",
            json!({"allowed": ["dns", "file"], "provided": payload.verification_method}),
        )
    })?;

    let domain = state
        .domain_service
        .add_domain(user.user_id, &payload.domain, method)
        .await?;

    Ok((StatusCode::CREATED, Json(DomainItem::from(domain))))
}

/// Returns one of the caller's domains.
///
/// # Endpoint
///
/// `GET /api/domains/{id}`
///
/// # Errors
///
/// Returns 404 if the caller owns no domain with this id.
pub async fn get_domain_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DomainItem>, AppError> {
    let domain = state.domain_service.get_domain(user.user_id, id).await?;

    Ok(Json(DomainItem::from(domain)))
}
