//! Handlers for domain health probes and history.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use uuid::Uuid;

use crate::api::dto::health::{
    DomainHealthResponse, HealthLogItem, HealthLogsQuery, HealthLogsResponse,
};
use crate::api::dto::verify::DomainIdRequest;
use crate::application::services::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Probes one of the caller's domains and records the result.
///
/// # Endpoint
///
/// `POST /api/domains/health`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "health": {
///     "status_code": 200,
///     "response_time": 143,
///     "is_healthy": true,
///     "error": null
///   }
/// }
/// ```
///
/// An unreachable host is `200 OK` with `status_code: 0` and an `error`.
///
/// # Errors
///
/// Returns 404 if the caller owns no domain with this id.
/// Returns 500 if the result cannot be recorded.
pub async fn check_health_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<DomainIdRequest>,
) -> Result<Json<DomainHealthResponse>, AppError> {
    let result = state
        .health_service
        .check_health(payload.domain_id, user.user_id)
        .await?;

    Ok(Json(DomainHealthResponse {
        success: true,
        health: result.into(),
    }))
}

/// Returns recent health logs of one of the caller's domains.
///
/// # Endpoint
///
/// `GET /api/domains/{id}/health-logs?limit=<1-500>`
///
/// # Errors
///
/// Returns 400 if `limit` is out of range.
/// Returns 404 if the caller owns no domain with this id.
pub async fn health_logs_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<HealthLogsQuery>,
) -> Result<Json<HealthLogsResponse>, AppError> {
    let history = state
        .health_service
        .history(user.user_id, id, query.limit)
        .await?;

    Ok(Json(HealthLogsResponse {
        summary: history.summary,
        items: history.logs.into_iter().map(HealthLogItem::from).collect(),
    }))
}
