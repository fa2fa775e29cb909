//! HTTP transport seam.
//!
//! [`UpstreamClient`](crate::UpstreamClient) only needs "GET this URL, give
//! me status and body"; [`ReqwestTransport`] does that over the network and
//! tests substitute scripted fakes.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::UpstreamConfig;
use crate::error::TransportError;

/// Status code and body text of a completed request.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] backed by a shared [`reqwest::Client`] carrying the
/// identifying headers and the request timeout.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &UpstreamConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert("X-Super-Client", HeaderValue::from_str(&config.client_name)?);
        headers.insert("X-Super-Contact", HeaderValue::from_str(&config.contact)?);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}
