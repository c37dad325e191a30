//! DTOs for ownership verification endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::VerificationStatus;

/// Body of `POST /api/domains/verify` and `POST /api/domains/health`.
#[derive(Debug, Deserialize)]
pub struct DomainIdRequest {
    #[serde(alias = "domainId")]
    pub domain_id: Uuid,
}

/// Result of a stored-domain verification.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub verified: bool,
    pub status: VerificationStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

/// Query of the diagnostic probes. Both parameters are required; they are
/// optional here so a missing one yields the API error body.
#[derive(Debug, Default, Deserialize)]
pub struct DiagnosticQuery {
    pub domain: Option<String>,
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_id_accepts_both_spellings() {
        let id = Uuid::new_v4();

        let snake: DomainIdRequest =
            serde_json::from_value(serde_json::json!({ "domain_id": id })).unwrap();
        let camel: DomainIdRequest =
            serde_json::from_value(serde_json::json!({ "domainId": id })).unwrap();

        assert_eq!(snake.domain_id, id);
        assert_eq!(camel.domain_id, id);
    }

    #[test]
    fn test_verify_response_omits_empty_detail() {
        let json = serde_json::to_value(VerifyResponse {
            success: true,
            verified: true,
            status: VerificationStatus::Verified,
            message: "Domain verified successfully".to_string(),
            error_detail: None,
        })
        .unwrap();

        assert_eq!(json["status"], "verified");
        assert!(json.get("error_detail").is_none());
    }
}
