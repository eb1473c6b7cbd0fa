//! Configuration validation.
//!
//! Serde handles syntax; this checks values. All errors are collected,
//! not just the first.

use std::fmt;

use crate::config::schema::ClientConfig;

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed config.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "node.base_url", &config.node.base_url);
    check_url(&mut errors, "node.faucet_url", &config.node.faucet_url);

    if config.node.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "node.request_timeout_secs",
            message: "must be greater than 0".into(),
        });
    }
    if config.gas.max_gas_amount == 0 {
        errors.push(ValidationError {
            field: "gas.max_gas_amount",
            message: "must be greater than 0".into(),
        });
    }
    if config.gas.expiration_window_secs == 0 {
        errors.push(ValidationError {
            field: "gas.expiration_window_secs",
            message: "must be greater than 0".into(),
        });
    }
    if config.polling.max_attempts == 0 {
        errors.push(ValidationError {
            field: "polling.max_attempts",
            message: "must be greater than 0".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
        Ok(u) => errors.push(ValidationError {
            field,
            message: format!("unsupported scheme '{}'", u.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field,
            message: format!("invalid URL '{}': {}", value, e),
        }),
    }
}
