//! DTOs for domain registration and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{
    Domain, DomainSettings, VerificationMethod, VerificationStatus,
};
use crate::utils::hostname::root_domain;
use crate::utils::probe_url::expected_txt_record;

/// Request to register a domain.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDomainRequest {
    #[validate(length(min = 1, max = 253, message = "Domain must be 1-253 characters"))]
    pub domain: String,

    /// `dns` or `file`.
    #[serde(alias = "verificationMethod")]
    pub verification_method: String,
}

/// Query parameters for `GET /api/domains`.
#[derive(Debug, Default, Deserialize)]
pub struct ListDomainsQuery {
    pub search: Option<String>,
}

/// What the owner has to publish to prove control.
#[derive(Debug, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum VerificationInstructions {
    Dns {
        /// Zone the TXT record goes on (last two labels of the domain).
        zone: String,
        host: &'static str,
        value: String,
    },
    File {
        file_name: String,
        url: String,
        content: String,
    },
}

impl VerificationInstructions {
    pub fn for_domain(domain: &Domain) -> Self {
        let token = &domain.verification_token;

        match domain.verification_method {
            VerificationMethod::Dns => Self::Dns {
                zone: root_domain(&domain.domain),
                host: "@",
                value: expected_txt_record(token),
            },
            VerificationMethod::File => {
                let file_name = format!("bing-indexnow-{token}.html");
                Self::File {
                    url: format!("https://{}/{file_name}", domain.domain),
                    file_name,
                    content: token.clone(),
                }
            }
        }
    }
}

/// Individual domain information.
#[derive(Debug, Serialize)]
pub struct DomainItem {
    pub id: Uuid,
    pub domain: String,
    pub verification_method: VerificationMethod,
    pub verification_token: String,
    pub verification_status: VerificationStatus,
    pub verification: VerificationInstructions,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub last_health_check: Option<DateTime<Utc>>,
    pub is_healthy: bool,
    pub settings: DomainSettings,
    pub created_at: DateTime<Utc>,
}

impl From<Domain> for DomainItem {
    fn from(d: Domain) -> Self {
        let verification = VerificationInstructions::for_domain(&d);

        DomainItem {
            id: d.id,
            domain: d.domain,
            verification_method: d.verification_method,
            verification_token: d.verification_token,
            verification_status: d.verification_status,
            verification,
            last_verified_at: d.last_verified_at,
            last_health_check: d.last_health_check,
            is_healthy: d.is_healthy,
            settings: d.settings,
            created_at: d.created_at,
        }
    }
}

/// Response containing list of domains.
#[derive(Debug, Serialize)]
pub struct DomainListResponse {
    pub items: Vec<DomainItem>,
}
