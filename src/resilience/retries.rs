//! Transport-level retries.
//!
//! # Responsibilities
//! - Decide whether a failed GET may be re-sent to the same host
//! - Re-send with exponential backoff + jitter, up to a fixed count
//!
//! # Design Decisions
//! - Only connection-establishment failures are retried; a request that
//!   reached the server (any status, read timeout) is reported as-is
//! - The count is configured once per upstream and applied uniformly
//! - Origin fallback is not a retry and lives in the CDN fetcher

use reqwest::{Client, Response};

use crate::config::RetryConfig;
use crate::resilience::backoff::calculate_backoff;

/// Retry settings for one upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one.
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff: &RetryConfig) -> Self {
        Self {
            max_retries,
            base_delay_ms: backoff.base_delay_ms,
            max_delay_ms: backoff.max_delay_ms,
        }
    }

    /// A policy that sends exactly once.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

/// Whether a transport error happened before the request reached the server.
pub fn is_retryable(err: &reqwest::Error) -> bool {
    err.is_connect()
}

/// GET `url`, retrying connection failures according to `policy`.
pub async fn get_with_retries(
    client: &Client,
    url: &str,
    policy: RetryPolicy,
) -> Result<Response, reqwest::Error> {
    let mut attempt = 0;
    loop {
        match client.get(url).send().await {
            Ok(response) => return Ok(response),
            Err(e) if attempt < policy.max_retries && is_retryable(&e) => {
                attempt += 1;
                let delay = calculate_backoff(attempt, policy.base_delay_ms, policy.max_delay_ms);
                tracing::debug!(url = %url, attempt, delay = ?delay, error = %e, "Retrying after connect error");
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
