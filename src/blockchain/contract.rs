//! Voting contract binding.
//!
//! The ABI is compiled in through `sol!`; only the address is resolved at
//! startup, once, and never changes for the life of the process.

use alloy::primitives::{Address, Bytes};
use alloy::sol;
use alloy::sol_types::SolCall;
use std::path::Path;

use crate::blockchain::deployment::DeploymentRecord;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::ContractConfig;

sol! {
    /// On-chain voting ledger.
    #[derive(Debug, PartialEq, Eq)]
    contract Voting {
        struct Candidate {
            string name;
            string metadata;
        }

        struct CandidateWithVotes {
            Candidate candidate;
            uint256 voteCount;
        }

        function addCandidate(Candidate calldata candidate) external;
        function vote(uint256 candidateId) external;
        function getCandidates() external view returns (CandidateWithVotes[] memory);
        function getWinner() external view returns (Candidate memory);
    }
}

/// The voting contract's ABI paired with its deployed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractBinding {
    address: Address,
}

impl ContractBinding {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Resolve the contract address from configuration.
    ///
    /// An explicit address wins; otherwise the deployment file is consulted.
    pub fn resolve(config: &ContractConfig) -> BlockchainResult<Self> {
        if let Some(address) = &config.address {
            let address = address
                .parse()
                .map_err(|e| BlockchainError::Deployment(format!("Invalid contract address '{}': {}", address, e)))?;
            tracing::info!(contract = %address, "Using configured contract address");
            return Ok(Self::new(address));
        }

        let path = config.deployment_file.as_deref().ok_or_else(|| {
            BlockchainError::Deployment("No contract address or deployment file configured".to_string())
        })?;

        let record = DeploymentRecord::load(Path::new(path))?;
        let address = record.contract_address(&config.contract_name).ok_or_else(|| {
            BlockchainError::Deployment(format!(
                "No deployment of '{}' found in {}",
                config.contract_name, path
            ))
        })?;

        tracing::info!(
            contract = %address,
            deployment_file = %path,
            "Resolved contract address from deployment record"
        );
        Ok(Self::new(address))
    }

    /// The deployed contract address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// ABI-encode a method call against this contract.
    pub fn encode<C: SolCall>(&self, call: &C) -> Bytes {
        Bytes::from(call.abi_encode())
    }
}
