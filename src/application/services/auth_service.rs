//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Identity of the caller, attached to requests by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Hashes a raw token with HMAC-SHA256 keyed by `signing_secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. Shared by request
/// authentication and the `admin` CLI so both agree on stored hashes.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(signing_secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Service for authenticating API requests via Bearer tokens.
///
/// An attacker with read-only access to the database cannot verify or forge
/// tokens without the server-side secret.
pub struct AuthService<R: TokenRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Authenticates a raw token and returns the user it belongs to.
    ///
    /// On success, updates the token's `last_used_at` timestamp. A failure to
    /// update it does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let user_id = self
            .repository
            .find_active_owner(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Invalid or revoked token"}))
            })?;

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, "Failed to update token last_used_at");
        }

        Ok(AuthenticatedUser { user_id })
    }
}
