//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the voting gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration for the HTTP boundary.
    pub timeouts: TimeoutConfig,

    /// Blockchain node connection.
    pub ledger: LedgerConfig,

    /// Voting contract location.
    pub contract: ContractConfig,

    /// Fee model used for every transaction intent.
    pub fees: FeeConfig,

    /// Testnet signing/submission endpoints.
    pub testnet: TestnetConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Blockchain node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
        }
    }
}

/// Where the deployed voting contract lives.
///
/// An explicit `address` takes precedence over the deployment file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Explicit contract address.
    pub address: Option<String>,

    /// Foundry broadcast file written by the deployment script.
    pub deployment_file: Option<String>,

    /// Contract name to look up in the deployment file.
    pub contract_name: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: None,
            deployment_file: Some("broadcast/Voting.s.sol/31337/run-latest.json".to_string()),
            contract_name: "Voting".to_string(),
        }
    }
}

/// Fee model for transaction intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FeeModel {
    /// Single gas price.
    #[default]
    Legacy,
    /// EIP-1559 max fee plus priority fee.
    FeeMarket,
}

impl std::str::FromStr for FeeModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(FeeModel::Legacy),
            "fee-market" | "eip1559" => Ok(FeeModel::FeeMarket),
            other => Err(format!("unknown fee model '{}'", other)),
        }
    }
}

/// Fee configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Process-wide fee model.
    pub model: FeeModel,

    /// Maximum gas price / max fee per gas in gwei (protection against spikes).
    /// Zero disables the check.
    pub max_fee_per_gas_gwei: u64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            model: FeeModel::Legacy,
            max_fee_per_gas_gwei: 500,
        }
    }
}

/// Testnet endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TestnetConfig {
    /// Mount `/testnet/sign` and `/testnet/submit`.
    ///
    /// WARNING: never enable on a deployment that may see mainnet keys.
    pub enabled: bool,
}

impl Default for TestnetConfig {
    fn default() -> Self {
        Self { enabled: true }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.ledger.rpc_url, "http://localhost:8545");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.fees.model, FeeModel::Legacy);
        assert!(config.testnet.enabled);
        assert!(config.contract.address.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [fees]
            model = "fee-market"

            [contract]
            address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            "#,
        )
        .unwrap();
        assert_eq!(config.fees.model, FeeModel::FeeMarket);
        assert_eq!(config.fees.max_fee_per_gas_gwei, 500);
        assert_eq!(config.contract.contract_name, "Voting");
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn test_fee_model_from_str() {
        assert_eq!("legacy".parse::<FeeModel>().unwrap(), FeeModel::Legacy);
        assert_eq!("fee-market".parse::<FeeModel>().unwrap(), FeeModel::FeeMarket);
        assert!("gasless".parse::<FeeModel>().is_err());
    }
}
