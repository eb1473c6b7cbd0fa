//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the client.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the ledger client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Remote node and faucet endpoints.
    pub node: NodeConfig,

    /// Gas parameters applied to every built transaction.
    pub gas: GasConfig,

    /// Confirmation polling.
    pub polling: PollingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Base URL of the node's REST API.
    pub base_url: String,

    /// Base URL of the faucet.
    pub faucet_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fullnode.devnet.aptoslabs.com".to_string(),
            faucet_url: "https://faucet.devnet.aptoslabs.com".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Gas parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GasConfig {
    /// Maximum gas units a transaction may consume.
    pub max_gas_amount: u64,

    /// Price per gas unit.
    pub gas_unit_price: u64,

    /// Seconds from build time until the transaction expires.
    pub expiration_window_secs: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            max_gas_amount: 2000,
            gas_unit_price: 1,
            expiration_window_secs: 600,
        }
    }
}

/// Confirmation polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Delay between status queries in milliseconds.
    pub interval_ms: u64,

    /// Total number of status queries before giving up.
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            max_attempts: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of the pretty format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.gas.max_gas_amount, 2000);
        assert_eq!(config.gas.gas_unit_price, 1);
        assert_eq!(config.gas.expiration_window_secs, 600);
        assert_eq!(config.polling.interval_ms, 1000);
        assert_eq!(config.polling.max_attempts, 10);
        assert_eq!(config.node.request_timeout_secs, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [node]
            base_url = "http://127.0.0.1:8080"

            [polling]
            max_attempts = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.node.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.node.request_timeout_secs, 10);
        assert_eq!(config.polling.max_attempts, 3);
        assert_eq!(config.polling.interval_ms, 1000);
        assert_eq!(config.gas.max_gas_amount, 2000);
    }
}
