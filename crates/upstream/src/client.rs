//! Production [`Upstream`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::backoff::BackoffPolicy;
use crate::config::UpstreamConfig;
use crate::error::{TransportError, UpstreamError};
use crate::pacing::Pacer;
use crate::source::{Target, Upstream};
use crate::transport::{ReqwestTransport, Transport};

const TOO_MANY_REQUESTS: u16 = 429;

/// Rate-limited client for the upstream API.
///
/// One instance is shared by the collector and the request handlers, so
/// the pacing marker covers every request the process makes.
pub struct UpstreamClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    pacer: Pacer,
    backoff: BackoffPolicy,
}

impl UpstreamClient {
    /// Create a client that talks HTTP through [`ReqwestTransport`].
    pub fn new(config: &UpstreamConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &UpstreamConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            pacer: Pacer::new(config.min_interval),
            backoff: config.backoff.clone(),
        }
    }

    fn url_for(&self, target: Target) -> String {
        format!("{}{}", self.base_url, target.path())
    }
}

#[async_trait]
impl Upstream for UpstreamClient {
    async fn fetch(&self, target: Target) -> Result<Value, UpstreamError> {
        let url = self.url_for(target);
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            self.pacer.wait_turn().await;

            let response = match self.transport.get(&url).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(
                        resource = target.name(),
                        %url,
                        attempt,
                        error = %e,
                        "Upstream request failed",
                    );
                    return Err(e.into());
                }
            };

            if response.status == TOO_MANY_REQUESTS {
                if !self.backoff.allows_retry(attempt) {
                    tracing::warn!(
                        resource = target.name(),
                        %url,
                        attempts = attempt,
                        "Upstream still rate limited, giving up",
                    );
                    return Err(UpstreamError::Throttled { attempts: attempt });
                }
                let delay = self.backoff.delay_after(attempt);
                tracing::info!(
                    resource = target.name(),
                    %url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Upstream rate limited, backing off",
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            if !response.is_success() {
                tracing::warn!(
                    resource = target.name(),
                    %url,
                    status = response.status,
                    "Upstream returned an error status",
                );
                return Err(UpstreamError::Status {
                    status: response.status,
                });
            }

            let value: Value = serde_json::from_str(&response.body).map_err(|e| {
                tracing::warn!(
                    resource = target.name(),
                    %url,
                    error = %e,
                    "Malformed upstream body",
                );
                UpstreamError::Decode(e.to_string())
            })?;

            let expected = target.shape();
            if !expected.matches(&value) {
                tracing::warn!(
                    resource = target.name(),
                    %url,
                    expected = %expected,
                    "Unexpected upstream response shape",
                );
                return Err(UpstreamError::UnexpectedShape { expected });
            }

            tracing::debug!(resource = target.name(), attempt, "Upstream fetch succeeded");
            return Ok(value);
        }
    }
}
