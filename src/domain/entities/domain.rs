//! Domain entity representing a monitored website.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// How a user proves control over a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMethod {
    /// A `bing-indexnow=<token>` TXT record on the root domain.
    Dns,
    /// A `bing-indexnow-<token>.html` file served over HTTPS.
    File,
}

impl VerificationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::Dns => "dns",
            VerificationMethod::File => "file",
        }
    }
}

impl FromStr for VerificationMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dns" => Ok(VerificationMethod::Dns),
            "file" => Ok(VerificationMethod::File),
            other => Err(UnknownVariant::new("verification_method", other)),
        }
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the most recent verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Failed,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Failed => "failed",
        }
    }
}

impl FromStr for VerificationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "failed" => Ok(VerificationStatus::Failed),
            other => Err(UnknownVariant::new("verification_status", other)),
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often URLs are pushed to the index once auto-indexing is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexingFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Per-domain indexing configuration.
///
/// Stored as JSON alongside the domain. Verification and health sampling
/// never modify it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainSettings {
    pub auto_sitemap_sync: bool,
    pub sitemap_urls: Vec<String>,
    pub auto_indexing: bool,
    pub indexing_frequency: IndexingFrequency,
}

/// Error returned when a stored enum value is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} value: {value}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// A domain registered by a user.
///
/// The hostname is unique across all users. `verification_method` and
/// `verification_token` are fixed at creation.
#[derive(Debug, Clone)]
pub struct Domain {
    pub id: Uuid,
    pub user_id: Uuid,
    pub domain: String,
    pub verification_method: VerificationMethod,
    pub verification_token: String,
    pub verification_status: VerificationStatus,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub last_health_check: Option<DateTime<Utc>>,
    pub is_healthy: bool,
    pub settings: DomainSettings,
    pub created_at: DateTime<Utc>,
}

impl Domain {
    /// Returns true if the last verification attempt succeeded.
    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }
}

/// Input data for registering a domain.
///
/// New domains start `pending` and optimistically healthy.
#[derive(Debug, Clone)]
pub struct NewDomain {
    pub user_id: Uuid,
    pub domain: String,
    pub verification_method: VerificationMethod,
    pub verification_token: String,
    pub settings: DomainSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_method_round_trips_through_str() {
        for method in [VerificationMethod::Dns, VerificationMethod::File] {
            assert_eq!(method.as_str().parse::<VerificationMethod>(), Ok(method));
        }
        assert!("DNS".parse::<VerificationMethod>().is_err());
    }

    #[test]
    fn test_verification_status_parse_unknown() {
        let err = "stale".parse::<VerificationStatus>().unwrap_err();
        assert_eq!(err.field, "verification_status");
        assert_eq!(err.value, "stale");
    }

    #[test]
    fn test_default_settings() {
        let settings = DomainSettings::default();

        assert!(!settings.auto_sitemap_sync);
        assert!(settings.sitemap_urls.is_empty());
        assert!(!settings.auto_indexing);
        assert_eq!(settings.indexing_frequency, IndexingFrequency::Daily);
    }

    #[test]
    fn test_settings_json_shape() {
        let json = serde_json::to_value(DomainSettings::default()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "auto_sitemap_sync": false,
                "sitemap_urls": [],
                "auto_indexing": false,
                "indexing_frequency": "daily"
            })
        );
    }

    #[test]
    fn test_settings_tolerate_missing_fields() {
        let settings: DomainSettings =
            serde_json::from_str(r#"{"indexing_frequency": "weekly"}"#).unwrap();

        assert_eq!(settings.indexing_frequency, IndexingFrequency::Weekly);
        assert!(!settings.auto_indexing);
    }
}
