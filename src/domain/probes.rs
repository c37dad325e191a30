//! Network capabilities used by verification and health sampling.
//!
//! Services depend on these traits rather than on a resolver or HTTP client
//! directly, so tests can substitute mocks and fakes.
//!
//! # Implementations
//!
//! - [`crate::infrastructure::dns::HickoryTxtResolver`] - DNS over hickory-resolver
//! - [`crate::infrastructure::http::ReqwestProbe`] - HTTP over reqwest

use async_trait::async_trait;

/// Failure of a single network probe.
///
/// These are business outcomes: services convert them into `failed` or
/// `unhealthy` results and never surface them as HTTP errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("domain not found: {0}")]
    NxDomain(String),

    #[error("no TXT records found for {0}")]
    NoRecords(String),

    #[error("DNS lookup failed: {0}")]
    Dns(String),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Status and body of an HTTP GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Resolves DNS TXT records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TxtResolver: Send + Sync {
    /// Returns the value of every TXT record on `name`.
    ///
    /// A record made of several character-strings is returned as their
    /// concatenation followed by each string on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::NxDomain`] if the name does not exist,
    /// [`ProbeError::NoRecords`] if it has no TXT records, and
    /// [`ProbeError::Dns`] for any other resolver failure.
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>, ProbeError>;
}

/// Issues HTTP requests on behalf of the verification and health services.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpProbe: Send + Sync {
    /// Fetches `url` with GET and returns the status and full body.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] if no response could be obtained.
    async fn get(&self, url: &str) -> Result<HttpResponse, ProbeError>;

    /// Sends a HEAD request to `url` and returns the response status.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] if no response could be obtained.
    async fn head(&self, url: &str) -> Result<u16, ProbeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_response_is_success() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let redirect = HttpResponse {
            status: 302,
            body: String::new(),
        };

        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_probe_error_messages() {
        assert_eq!(
            ProbeError::NxDomain("example.invalid".into()).to_string(),
            "domain not found: example.invalid"
        );
        assert_eq!(ProbeError::Timeout.to_string(), "request timed out");
    }
}
