//! Ordered CDN fallback.
//!
//! Origins are tried one after another, never concurrently. The first
//! HTTP 200 wins; every other outcome is noted and the walk moves on.

use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::cdn::origin::CdnOrigin;
use crate::config::GatewayConfig;
use crate::net::{build_client, climbs_out};
use crate::observability::metrics;
use crate::resilience::{get_with_retries, RetryPolicy};

/// Content type used when an origin omits the header.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// A file served by one of the origins.
#[derive(Debug, Clone)]
pub struct CdnFile {
    pub body: Bytes,
    pub content_type: String,
    /// Label of the origin that served it.
    pub origin: String,
}

/// Why a single origin did not produce the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    Status(StatusCode),
    Transport(String),
    Body(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Status(status) => write!(f, "status {}", status),
            FailureReason::Transport(e) => write!(f, "transport error: {}", e),
            FailureReason::Body(e) => write!(f, "body read failed: {}", e),
        }
    }
}

impl FailureReason {
    fn outcome(&self) -> &'static str {
        match self {
            FailureReason::Status(_) => "bad_status",
            FailureReason::Transport(_) => "transport_error",
            FailureReason::Body(_) => "body_error",
        }
    }
}

/// One origin's failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginFailure {
    pub origin: String,
    pub reason: FailureReason,
}

/// Error type for CDN fetches.
#[derive(Debug, Error)]
pub enum CdnError {
    /// No origin returned the file. Missing files and unreachable origins
    /// look the same here; `attempts` keeps the per-origin detail.
    #[error("{package}@{version}/{path} not found on any CDN origin")]
    NotFound {
        package: String,
        version: String,
        path: String,
        attempts: Vec<OriginFailure>,
    },
}

/// Fetches package files from the configured origins.
#[derive(Debug, Clone)]
pub struct CdnFetcher {
    client: Client,
    origins: Vec<CdnOrigin>,
    retry: RetryPolicy,
}

impl CdnFetcher {
    /// Build a fetcher from the `cdn`, `timeouts` and `retries` sections.
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = build_client(
            Duration::from_secs(config.cdn.timeout_secs),
            Duration::from_secs(config.timeouts.connect_secs),
        )?;
        let origins = config.cdn.origins.iter().map(|o| CdnOrigin::new(o)).collect();
        Ok(Self::with_client(
            client,
            origins,
            RetryPolicy::new(config.cdn.retries, &config.retries),
        ))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client, origins: Vec<CdnOrigin>, retry: RetryPolicy) -> Self {
        Self { client, origins, retry }
    }

    pub fn origins(&self) -> &[CdnOrigin] {
        &self.origins
    }

    /// Candidate URLs for a file, in the order they will be tried.
    pub fn candidate_urls(&self, package: &str, version: &str, path: &str) -> Vec<String> {
        self.origins
            .iter()
            .map(|origin| origin.file_url(package, version, path))
            .collect()
    }

    /// Fetch `path` of `package@version` from the first origin that has it.
    ///
    /// Any part with a `..` segment is rejected without contacting an origin.
    pub async fn fetch_file(
        &self,
        package: &str,
        version: &str,
        path: &str,
    ) -> Result<CdnFile, CdnError> {
        if [package, version, path].into_iter().any(climbs_out) {
            tracing::warn!(package = %package, version = %version, path = %path, "Rejected path outside the package root");
            return Err(CdnError::NotFound {
                package: package.to_string(),
                version: version.to_string(),
                path: path.to_string(),
                attempts: Vec::new(),
            });
        }

        let mut attempts = Vec::with_capacity(self.origins.len());

        for origin in &self.origins {
            let url = origin.file_url(package, version, path);
            match self.try_origin(&url).await {
                Ok((body, content_type)) => {
                    metrics::record_cdn_fetch(origin.label(), "ok");
                    tracing::debug!(origin = %origin.label(), url = %url, "CDN hit");
                    return Ok(CdnFile {
                        body,
                        content_type,
                        origin: origin.label().to_string(),
                    });
                }
                Err(reason) => {
                    metrics::record_cdn_fetch(origin.label(), reason.outcome());
                    tracing::debug!(origin = %origin.label(), url = %url, reason = %reason, "CDN miss, trying next origin");
                    attempts.push(OriginFailure {
                        origin: origin.label().to_string(),
                        reason,
                    });
                }
            }
        }

        tracing::warn!(
            package = %package,
            version = %version,
            path = %path,
            attempts = ?attempts,
            "File not available from any CDN origin"
        );
        Err(CdnError::NotFound {
            package: package.to_string(),
            version: version.to_string(),
            path: path.to_string(),
            attempts,
        })
    }

    async fn try_origin(&self, url: &str) -> Result<(Bytes, String), FailureReason> {
        let response = get_with_retries(&self.client, url, self.retry)
            .await
            .map_err(|e| FailureReason::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FailureReason::Status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let body = response
            .bytes()
            .await
            .map_err(|e| FailureReason::Body(e.to_string()))?;

        Ok((body, content_type))
    }
}
