//! URLs and record values used by the ownership proofs and health probes.

use url::Url;

/// Prefix of the TXT record value proving ownership.
pub const TXT_RECORD_PREFIX: &str = "bing-indexnow=";

/// Expected TXT record value for a token: `bing-indexnow=<token>`.
pub fn expected_txt_record(token: &str) -> String {
    format!("{TXT_RECORD_PREFIX}{token}")
}

/// Location of the ownership file: `https://<domain>/bing-indexnow-<token>.html`.
///
/// # Errors
///
/// Returns [`url::ParseError`] if the hostname cannot form a valid URL.
pub fn verification_file_url(domain: &str, token: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("https://{domain}/bing-indexnow-{token}.html"))
}

/// Root URL probed by the health sampler: `https://<domain>`.
///
/// # Errors
///
/// Returns [`url::ParseError`] if the hostname cannot form a valid URL.
pub fn health_check_url(domain: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("https://{domain}"))
}
