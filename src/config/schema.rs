//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, concurrency).
    pub listener: ListenerConfig,

    /// npm registry used for manifest lookups.
    pub registry: RegistryConfig,

    /// CDN origins files are served from, in priority order.
    pub cdn: CdnConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Backoff applied between transport-level retries.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Maximum concurrently handled requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Registry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Registry base URL; manifests live at `{url}/{package}`.
    pub url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Connect retries before a lookup is reported as failed.
    pub retries: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: "https://registry.npmjs.org".to_string(),
            timeout_secs: 30,
            retries: 0,
        }
    }
}

/// CDN configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CdnConfig {
    /// Origin base URLs, tried strictly in order.
    pub origins: Vec<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Connect retries against a single origin before falling back to the next.
    pub retries: u32,
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            origins: vec![
                "https://cdn.jsdelivr.net/npm".to_string(),
                "https://unpkg.com".to_string(),
            ],
            timeout_secs: 15,
            retries: 2,
        }
    }
}

/// Timeout configuration shared by all outbound calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Optional deadline for a whole inbound request, in seconds.
    /// Unset means each outbound call is bounded on its own.
    pub request_secs: Option<u64>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: None,
        }
    }
}

/// Retry backoff configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum delay for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 100,
            max_delay_ms: 2000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Strip trailing slashes from every configured base URL so that
    /// request URLs can be built with a single `/` separator.
    pub fn normalize(&mut self) {
        self.registry.url = self.registry.url.trim_end_matches('/').to_string();
        for origin in &mut self.cdn.origins {
            *origin = origin.trim_end_matches('/').to_string();
        }
    }
}
