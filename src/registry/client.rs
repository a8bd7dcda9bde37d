//! Manifest fetching.
//!
//! One GET per lookup against `{registry}/{package}`; nothing is cached,
//! so repeated lookups for the same package hit the registry again.

use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::config::GatewayConfig;
use crate::net::build_client;
use crate::observability::metrics;
use crate::registry::manifest::Manifest;
use crate::resilience::{get_with_retries, RetryPolicy};

/// Error type for manifest lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry answered 404 for the package.
    #[error("package {0} not found")]
    NotFound(String),

    /// Any other non-success status.
    #[error("registry returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// Connect failure, timeout, or an interrupted body.
    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not a manifest.
    #[error("malformed manifest for {package}: {source}")]
    Decode {
        package: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryError {
    fn outcome(&self) -> &'static str {
        match self {
            RegistryError::NotFound(_) => "not_found",
            RegistryError::Status { .. } => "bad_status",
            RegistryError::Transport(_) => "transport_error",
            RegistryError::Decode { .. } => "decode_error",
        }
    }
}

/// Client for the package registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl RegistryClient {
    /// Build a client from the `registry`, `timeouts` and `retries` sections.
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = build_client(
            Duration::from_secs(config.registry.timeout_secs),
            Duration::from_secs(config.timeouts.connect_secs),
        )?;
        Ok(Self::with_client(
            client,
            &config.registry.url,
            RetryPolicy::new(config.registry.retries, &config.retries),
        ))
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client, base_url: &str, retry: RetryPolicy) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry,
        }
    }

    /// URL of a package's manifest.
    pub fn manifest_url(&self, package: &str) -> String {
        format!("{}/{}", self.base_url, package)
    }

    /// Fetch the full manifest of `package`.
    pub async fn fetch_manifest(&self, package: &str) -> Result<Manifest, RegistryError> {
        let result = self.fetch(package).await;
        match &result {
            Ok(_) => metrics::record_registry_fetch("ok"),
            Err(e) => {
                metrics::record_registry_fetch(e.outcome());
                if !matches!(e, RegistryError::NotFound(_)) {
                    tracing::warn!(package = %package, error = %e, "Manifest lookup failed");
                }
            }
        }
        result
    }

    async fn fetch(&self, package: &str) -> Result<Manifest, RegistryError> {
        let url = self.manifest_url(package);
        tracing::debug!(package = %package, url = %url, "Fetching manifest");

        let response = get_with_retries(&self.client, &url, self.retry).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package.to_string()));
        }
        if !status.is_success() {
            return Err(RegistryError::Status { status, url });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| RegistryError::Decode {
            package: package.to_string(),
            source,
        })
    }
}
