//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that registry and CDN origins are usable http(s) base URLs
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: {value:?} is not an http(s) URL")]
    InvalidUrl { field: String, value: String },

    #[error("cdn.origins: at least one origin is required")]
    NoOrigins,

    #[error("{0}: must be greater than zero")]
    Zero(&'static str),

    #[error("retries: base_delay_ms ({base}) exceeds max_delay_ms ({max})")]
    BackoffRange { base: u64, max: u64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::Zero("listener.max_connections"));
    }

    check_url("registry.url".to_string(), &config.registry.url, &mut errors);
    if config.registry.timeout_secs == 0 {
        errors.push(ValidationError::Zero("registry.timeout_secs"));
    }

    if config.cdn.origins.is_empty() {
        errors.push(ValidationError::NoOrigins);
    }
    for (i, origin) in config.cdn.origins.iter().enumerate() {
        check_url(format!("cdn.origins[{}]", i), origin, &mut errors);
    }
    if config.cdn.timeout_secs == 0 {
        errors.push(ValidationError::Zero("cdn.timeout_secs"));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.connect_secs"));
    }
    if config.timeouts.request_secs == Some(0) {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if config.retries.base_delay_ms > config.retries.max_delay_ms {
        errors.push(ValidationError::BackoffRange {
            base: config.retries.base_delay_ms,
            max: config.retries.max_delay_ms,
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: String, value: &str, errors: &mut Vec<ValidationError>) {
    let ok = Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !ok {
        errors.push(ValidationError::InvalidUrl {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.registry.url = "ftp://registry".into();
        config.cdn.origins.clear();
        config.cdn.timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::NoOrigins));
        assert!(errors.contains(&ValidationError::Zero("cdn.timeout_secs")));
    }

    #[test]
    fn test_rejects_relative_origin() {
        let mut config = GatewayConfig::default();
        config.cdn.origins.push("/npm".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidUrl {
                field: "cdn.origins[2]".into(),
                value: "/npm".into(),
            }]
        );
    }

    #[test]
    fn test_rejects_inverted_backoff() {
        let mut config = GatewayConfig::default();
        config.retries.base_delay_ms = 5000;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::BackoffRange { base: 5000, max: 2000 }]
        );
    }
}
