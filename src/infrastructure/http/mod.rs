//! HTTP probes over reqwest.
//!
//! Verification and health probes identify themselves with different
//! user agents, so each gets its own client. Both share the same timeouts.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::domain::probes::{HttpProbe, HttpResponse, ProbeError};

/// Default connect timeout (TCP handshake + TLS).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default request timeout (total request/response time).
///
/// reqwest applies no total timeout of its own.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Most bytes of a verification file body that are read.
pub const MAX_VERIFICATION_BODY: usize = 4 * 1024;

/// Settings for [`ReqwestProbe`].
#[derive(Debug, Clone)]
pub struct ProbeClientConfig {
    pub verify_user_agent: String,
    pub health_user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ProbeClientConfig {
    fn default() -> Self {
        Self {
            verify_user_agent: "BingIndex Verification/1.0".to_string(),
            health_user_agent: "BingIndex Health Check".to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// [`HttpProbe`] implementation: GET for ownership files, HEAD for health.
pub struct ReqwestProbe {
    verify_client: Client,
    health_client: Client,
}

impl ReqwestProbe {
    /// Builds both clients.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if a client cannot be built (e.g. TLS backend
    /// initialisation fails).
    pub fn new(config: &ProbeClientConfig) -> Result<Self, reqwest::Error> {
        let build = |user_agent: &str| {
            Client::builder()
                .user_agent(user_agent)
                .connect_timeout(config.connect_timeout)
                .timeout(config.request_timeout)
                .build()
        };

        Ok(Self {
            verify_client: build(&config.verify_user_agent)?,
            health_client: build(&config.health_user_agent)?,
        })
    }
}

fn classify(e: reqwest::Error) -> ProbeError {
    if e.is_timeout() {
        ProbeError::Timeout
    } else if e.is_connect() {
        ProbeError::Connect(e.to_string())
    } else {
        ProbeError::Request(e.to_string())
    }
}

/// Reads at most `limit` bytes of the body, decoded as lossy UTF-8.
async fn read_capped(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<String, reqwest::Error> {
    let mut body = Vec::new();

    while let Some(chunk) = response.chunk().await? {
        let remaining = limit - body.len();
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[async_trait]
impl HttpProbe for ReqwestProbe {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProbeError> {
        let response = self.verify_client.get(url).send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = read_capped(response, MAX_VERIFICATION_BODY)
            .await
            .map_err(classify)?;

        Ok(HttpResponse { status, body })
    }

    async fn head(&self, url: &str) -> Result<u16, ProbeError> {
        let response = self.health_client.head(url).send().await.map_err(classify)?;

        Ok(response.status().as_u16())
    }
}
