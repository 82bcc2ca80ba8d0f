//! Error definitions shared by the ledger-facing components.

use thiserror::Error;

use crate::blockchain::revert::ContractRevert;

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// The node was unreachable or rejected the request for a reason other
    /// than a contract revert.
    #[error("Ledger unavailable: {0}")]
    GatewayUnavailable(String),

    /// The contract rejected the call or transaction.
    #[error("Contract reverted: {0}")]
    ContractRevert(ContractRevert),

    /// Returned data did not match the contract's declared shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Malformed key or transaction during local signing.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Gas price exceeded maximum allowed.
    #[error("Fee {current_gwei} gwei exceeds maximum {max_gwei} gwei")]
    FeeTooHigh { current_gwei: u128, max_gwei: u64 },

    /// The contract address could not be resolved at startup.
    #[error("Deployment error: {0}")]
    Deployment(String),
}

impl BlockchainError {
    /// The structured revert, if this error carries one.
    pub fn as_revert(&self) -> Option<&ContractRevert> {
        match self {
            BlockchainError::ContractRevert(revert) => Some(revert),
            _ => None,
        }
    }
}

impl From<ContractRevert> for BlockchainError {
    fn from(revert: ContractRevert) -> Self {
        BlockchainError::ContractRevert(revert)
    }
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;
