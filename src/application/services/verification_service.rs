//! Domain ownership verification.
//!
//! Two proofs are supported:
//!
//! - **dns**: a TXT record `bing-indexnow=<token>` on the root domain
//!   (the last two labels of the hostname)
//! - **file**: `https://<domain>/bing-indexnow-<token>.html` answering 2xx
//!   with a body that is exactly `<token>` after trimming
//!
//! Each attempt recomputes the status from scratch and overwrites the stored
//! fields, so repeated calls while DNS or the file propagates are safe.

use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Domain, VerificationMethod, VerificationStatus};
use crate::domain::probes::{HttpProbe, TxtResolver};
use crate::domain::repositories::DomainRepository;
use crate::error::AppError;
use crate::utils::hostname::{normalize_hostname, root_domain, validate_token};
use crate::utils::probe_url::{expected_txt_record, verification_file_url};

/// Result of verifying a stored domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    pub verified: bool,
    pub status: VerificationStatus,
    /// Why the proof was not accepted. `None` when verified.
    pub error_detail: Option<String>,
}

/// Result of a DNS TXT proof check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsCheck {
    pub verified: bool,
    pub root_domain: String,
    pub expected_record: String,
    pub records: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of an HTTP file proof check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileCheck {
    pub verified: bool,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DnsCheck {
    fn failure_detail(&self) -> String {
        match &self.error {
            Some(error) => error.clone(),
            None => format!(
                "TXT record {} not found on {}",
                self.expected_record, self.root_domain
            ),
        }
    }
}

impl FileCheck {
    fn failure_detail(&self) -> String {
        match (&self.error, self.status_code) {
            (Some(error), _) => error.clone(),
            (None, Some(status)) if !(200..300).contains(&status) => {
                format!("{} returned HTTP {}", self.url, status)
            }
            _ => format!("{} does not contain the verification token", self.url),
        }
    }
}

/// Verification Engine.
///
/// Decides whether a claimed domain is controlled by its owner and records
/// the outcome on the domain.
pub struct VerificationService<R, D, H>
where
    R: DomainRepository + ?Sized,
    D: TxtResolver + ?Sized,
    H: HttpProbe + ?Sized,
{
    repository: Arc<R>,
    resolver: Arc<D>,
    http: Arc<H>,
}

impl<R, D, H> VerificationService<R, D, H>
where
    R: DomainRepository + ?Sized,
    D: TxtResolver + ?Sized,
    H: HttpProbe + ?Sized,
{
    /// Creates a new verification service.
    pub fn new(repository: Arc<R>, resolver: Arc<D>, http: Arc<H>) -> Self {
        Self {
            repository,
            resolver,
            http,
        }
    }

    /// Verifies one of the caller's domains and stores the result.
    ///
    /// On success the domain becomes `verified` with `last_verified_at = now`;
    /// otherwise it becomes `failed` with `last_verified_at` cleared. DNS and
    /// HTTP failures are part of the outcome, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the caller owns no domain with this id,
    /// including when ownership changes between the read and the write.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn verify(
        &self,
        domain_id: Uuid,
        user_id: Uuid,
    ) -> Result<VerificationOutcome, AppError> {
        let domain = self
            .repository
            .find_owned(domain_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Domain not found or unauthorized",
                    json!({"id": domain_id}),
                )
            })?;

        let (verified, error_detail) = self.run_proof(&domain).await;

        let (status, last_verified_at) = if verified {
            (VerificationStatus::Verified, Some(Utc::now()))
        } else {
            (VerificationStatus::Failed, None)
        };

        self.repository
            .update_verification(domain.id, user_id, status, last_verified_at)
            .await?;

        metrics::counter!(
            "domain_verifications_total",
            "method" => domain.verification_method.as_str(),
            "status" => status.as_str()
        )
        .increment(1);

        tracing::info!(
            domain = %domain.domain,
            domain_id = %domain.id,
            method = %domain.verification_method,
            verified,
            "Verification completed"
        );

        Ok(VerificationOutcome {
            verified,
            status,
            error_detail,
        })
    }

    /// Checks the DNS proof for an arbitrary hostname and token without
    /// touching stored state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the hostname or token is malformed.
    pub async fn check_dns(&self, domain: &str, token: &str) -> Result<DnsCheck, AppError> {
        let domain = normalize_hostname(domain)?;
        validate_token(token)?;

        Ok(self.probe_dns(&domain, token).await)
    }

    /// Checks the file proof for an arbitrary hostname and token without
    /// touching stored state.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the hostname or token is malformed.
    pub async fn check_file(&self, domain: &str, token: &str) -> Result<FileCheck, AppError> {
        let domain = normalize_hostname(domain)?;
        validate_token(token)?;

        Ok(self.probe_file(&domain, token).await)
    }

    async fn run_proof(&self, domain: &Domain) -> (bool, Option<String>) {
        match domain.verification_method {
            VerificationMethod::Dns => {
                let check = self
                    .probe_dns(&domain.domain, &domain.verification_token)
                    .await;
                let detail = (!check.verified).then(|| check.failure_detail());
                (check.verified, detail)
            }
            VerificationMethod::File => {
                let check = self
                    .probe_file(&domain.domain, &domain.verification_token)
                    .await;
                let detail = (!check.verified).then(|| check.failure_detail());
                (check.verified, detail)
            }
        }
    }

    async fn probe_dns(&self, domain: &str, token: &str) -> DnsCheck {
        let root_domain = root_domain(domain);
        let expected_record = expected_txt_record(token);

        match self.resolver.lookup_txt(&root_domain).await {
            Ok(records) => {
                let verified = records
                    .iter()
                    .any(|record| record.trim() == expected_record);

                tracing::debug!(
                    domain,
                    root_domain = %root_domain,
                    found = records.len(),
                    verified,
                    "TXT records checked"
                );

                DnsCheck {
                    verified,
                    root_domain,
                    expected_record,
                    records,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(domain, root_domain = %root_domain, error = %e, "TXT lookup failed");

                DnsCheck {
                    verified: false,
                    root_domain,
                    expected_record,
                    records: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn probe_file(&self, domain: &str, token: &str) -> FileCheck {
        let url = match verification_file_url(domain, token) {
            Ok(url) => url.to_string(),
            Err(e) => {
                return FileCheck {
                    verified: false,
                    url: format!("https://{domain}/bing-indexnow-{token}.html"),
                    status_code: None,
                    error: Some(format!("Invalid verification URL: {e}")),
                };
            }
        };

        match self.http.get(&url).await {
            Ok(response) => {
                let verified = response.is_success() && file_body_value(&response.body) == token;

                tracing::debug!(
                    domain,
                    status = response.status,
                    verified,
                    "Verification file checked"
                );

                FileCheck {
                    verified,
                    url,
                    status_code: Some(response.status),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(domain, error = %e, "Verification file fetch failed");

                FileCheck {
                    verified: false,
                    url,
                    status_code: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

/// Token text of a verification file: whitespace and a byte order mark are
/// ignored at either end.
fn file_body_value(body: &str) -> &str {
    body.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
