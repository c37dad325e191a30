//! Hostname validation and root-domain extraction.
//!
//! Hostnames are stored normalized (trimmed, lowercase) and must match a strict
//! grammar: dot-separated labels of 1-63 characters, alphanumeric plus hyphen,
//! no leading or trailing hyphen, at least one dot, and a TLD label of at
//! least two characters.

use crate::error::AppError;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Maximum length of a DNS name in presentation format (without trailing dot).
const MAX_HOSTNAME_LEN: usize = 253;

/// Maximum length of a token accepted by the diagnostic endpoints.
const MAX_TOKEN_LEN: usize = 128;

static HOSTNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]$")
        .unwrap()
});

/// Trims and lowercases a hostname, then validates it.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the result is empty, too long, or does
/// not match the hostname grammar.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_hostname("  Example.COM ").unwrap(), "example.com");
/// assert!(normalize_hostname("localhost").is_err());
/// ```
pub fn normalize_hostname(input: &str) -> Result<String, AppError> {
    let hostname = input.trim().to_lowercase();

    if hostname.is_empty() {
        return Err(AppError::bad_request("Domain is required", json!({})));
    }

    if hostname.len() > MAX_HOSTNAME_LEN {
        return Err(AppError::bad_request(
            "Domain name is too long",
            json!({ "max": MAX_HOSTNAME_LEN, "provided_length": hostname.len() }),
        ));
    }

    if !HOSTNAME_REGEX.is_match(&hostname) {
        return Err(AppError::bad_request(
            "Please enter a valid domain name",
            json!({ "domain": hostname }),
        ));
    }

    Ok(hostname)
}

/// Returns the last two dot-separated labels of a hostname.
///
/// This does not consult the public suffix list, so multi-label suffixes
/// resolve to the suffix itself (`a.b.co.uk` -> `co.uk`). DNS instructions
/// shown to users assume this behavior.
pub fn root_domain(hostname: &str) -> String {
    let labels: Vec<&str> = hostname.split('.').collect();

    if labels.len() <= 2 {
        return hostname.to_string();
    }

    labels[labels.len() - 2..].join(".")
}

/// Validates a verification token supplied by a caller.
///
/// # Rules
///
/// - Length: 1-128 characters
/// - Allowed characters: ASCII letters and digits
///
/// # Errors
///
/// Returns [`AppError::Validation`] if a rule is violated.
pub fn validate_token(token: &str) -> Result<(), AppError> {
    if token.is_empty() || token.len() > MAX_TOKEN_LEN {
        return Err(AppError::bad_request(
            "Invalid token length",
            json!({ "min": 1, "max": MAX_TOKEN_LEN }),
        ));
    }

    if !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request(
            "Token can only contain letters and digits",
            json!({}),
        ));
    }

    Ok(())
}
