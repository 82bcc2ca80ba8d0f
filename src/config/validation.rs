//! Configuration validation.
//!
//! Semantic checks only; serde already handled the syntax. Every problem is
//! reported, not just the first one.

use std::fmt;
use std::net::SocketAddr;

use alloy::primitives::Address;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }

    if let Err(e) = config.ledger.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "ledger.rpc_url",
            format!("'{}' is not a URL: {}", config.ledger.rpc_url, e),
        ));
    }

    match (&config.contract.address, &config.contract.deployment_file) {
        (Some(address), _) => {
            if address.parse::<Address>().is_err() {
                errors.push(ValidationError::new(
                    "contract.address",
                    format!("'{}' is not an address", address),
                ));
            }
        }
        (None, Some(_)) => {
            if config.contract.contract_name.is_empty() {
                errors.push(ValidationError::new(
                    "contract.contract_name",
                    "required when resolving from a deployment file",
                ));
            }
        }
        (None, None) => errors.push(ValidationError::new(
            "contract",
            "either address or deployment_file must be set",
        )),
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
