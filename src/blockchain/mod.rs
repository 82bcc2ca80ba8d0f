//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Startup: config → deployment.rs → contract.rs (ContractBinding)
//!          config → client.rs (RpcGateway, one per process)
//!
//! Write intents:  transaction.rs (encode, fee/nonce/chain id, assemble)
//! Testnet only:   wallet.rs (sign) → relay.rs (submit, await inclusion)
//! Failures:       revert.rs (decode node reverts) → types.rs (BlockchainError)
//! ```
//!
//! # Security Constraints
//! - Private keys only arrive with testnet requests and are never logged
//! - The gateway and binding are immutable after startup and shared freely

pub mod client;
pub mod contract;
pub mod deployment;
pub mod intent;
pub mod relay;
pub mod revert;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{CallRequest, FeeMarketEstimate, Inclusion, LedgerGateway, RpcGateway};
pub use contract::{ContractBinding, Voting};
pub use intent::{FeeFields, SignedTransaction, TransactionIntent};
pub use relay::SubmissionRelay;
pub use revert::ContractRevert;
pub use transaction::IntentBuilder;
pub use types::{BlockchainError, BlockchainResult};
pub use wallet::{DecodedTransaction, TestnetSigner};
