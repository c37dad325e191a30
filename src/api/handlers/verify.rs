//! Handlers for ownership verification endpoints.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde_json::json;

use crate::api::dto::verify::{DiagnosticQuery, DomainIdRequest, VerifyResponse};
use crate::application::services::{AuthenticatedUser, DnsCheck, FileCheck};
use crate::error::AppError;
use crate::state::AppState;

/// Verifies ownership of one of the caller's domains and stores the outcome.
///
/// # Endpoint
///
/// `POST /api/domains/verify`
///
/// # Request Body
///
/// ```json
/// { "domain_id": "6f1c..." }
/// ```
///
/// `domainId` is accepted as well.
///
/// # Response
///
/// A failed proof is still `200 OK`:
///
/// ```json
/// {
///   "success": true,
///   "verified": false,
///   "status": "failed",
///   "message": "Verification failed",
///   "error_detail": "TXT record bing-indexnow=abc123 not found on example.com"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 if the caller owns no domain with this id.
/// Returns 500 if the outcome cannot be stored.
pub async fn verify_domain_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<DomainIdRequest>,
) -> Result<Json<VerifyResponse>, AppError> {
    let outcome = state
        .verification_service
        .verify(payload.domain_id, user.user_id)
        .await?;

    let message = if outcome.verified {
        "Domain verified successfully"
    } else {
        "Verification failed"
    };

    Ok(Json(VerifyResponse {
        success: true,
        verified: outcome.verified,
        status: outcome.status,
        message: message.to_string(),
        error_detail: outcome.error_detail,
    }))
}

/// Checks a DNS TXT proof without touching stored state.
///
/// # Endpoint
///
/// `GET /api/domains/verify/dns?domain=<host>&token=<token>`
///
/// # Errors
///
/// Returns 400 if a parameter is missing or malformed. Lookup failures are
/// reported in the body with `verified: false`.
pub async fn verify_dns_handler(
    State(state): State<AppState>,
    Query(query): Query<DiagnosticQuery>,
) -> Result<Json<DnsCheck>, AppError> {
    let (domain, token) = required_params(query)?;

    let check = state.verification_service.check_dns(&domain, &token).await?;

    Ok(Json(check))
}

/// Checks an HTTP file proof without touching stored state.
///
/// # Endpoint
///
/// `GET /api/domains/verify/file?domain=<host>&token=<token>`
///
/// # Errors
///
/// Returns 400 if a parameter is missing or malformed. Fetch failures are
/// reported in the body with `verified: false`.
pub async fn verify_file_handler(
    State(state): State<AppState>,
    Query(query): Query<DiagnosticQuery>,
) -> Result<Json<FileCheck>, AppError> {
    let (domain, token) = required_params(query)?;

    let check = state
        .verification_service
        .check_file(&domain, &token)
        .await?;

    Ok(Json(check))
}

fn required_params(query: DiagnosticQuery) -> Result<(String, String), AppError> {
    match (query.domain, query.token) {
        (Some(domain), Some(token)) => Ok((domain, token)),
        (domain, token) => Err(AppError::bad_request(
            "Missing domain or token",
            json!({"domain": domain.is_some(), "token": token.is_some()}),
        )),
    }
}
