//! Foundry broadcast records (`broadcast/<script>/<chain>/run-latest.json`).

use alloy::primitives::Address;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// The subset of a broadcast file needed to locate deployed contracts.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentRecord {
    #[serde(default)]
    pub transactions: Vec<DeploymentTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentTransaction {
    #[serde(default)]
    pub transaction_type: String,
    pub contract_name: Option<String>,
    pub contract_address: Option<Address>,
}

impl DeploymentRecord {
    pub fn load(path: &Path) -> BlockchainResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BlockchainError::Deployment(format!("Cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            BlockchainError::Deployment(format!("Malformed deployment record {}: {}", path.display(), e))
        })
    }

    /// Address of the most recent `CREATE` of `contract_name`.
    pub fn contract_address(&self, contract_name: &str) -> Option<Address> {
        self.transactions
            .iter()
            .rev()
            .filter(|tx| tx.transaction_type.eq_ignore_ascii_case("CREATE"))
            .filter(|tx| tx.contract_name.as_deref() == Some(contract_name))
            .find_map(|tx| tx.contract_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_latest_create_wins() {
        let record: DeploymentRecord = serde_json::from_str(
            r#"{
                "transactions": [
                    {"transactionType": "CREATE", "contractName": "Voting",
                     "contractAddress": "0x5fbdb2315678afecb367f032d93f642f64180aa3"},
                    {"transactionType": "CALL", "contractName": "Voting",
                     "contractAddress": "0x5fbdb2315678afecb367f032d93f642f64180aa3"},
                    {"transactionType": "CREATE", "contractName": "Voting",
                     "contractAddress": "0xe7f1725e7734ce288f8367e1bb143e90bb3f0512"},
                    {"transactionType": "CREATE", "contractName": "Token",
                     "contractAddress": "0x9fe46736679d2d9a65f0992f2272de9f3c7fa6e0"}
                ],
                "chain": 31337
            }"#,
        )
        .unwrap();

        assert_eq!(
            record.contract_address("Voting"),
            Some(address!("e7f1725e7734ce288f8367e1bb143e90bb3f0512"))
        );
        assert_eq!(record.contract_address("Missing"), None);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DeploymentRecord::load(Path::new("/no/such/run-latest.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
