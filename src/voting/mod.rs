//! Voting service.
//!
//! # Data Flow
//! ```text
//! POST /voting/candidates ─┐
//! POST /voting/vote ───────┼─▶ IntentBuilder (unsigned TransactionIntent)
//!                          │
//! GET  /voting/candidates ─┼─▶ ReadQueryExecutor (eth_call + decode)
//! GET  /voting/winner ─────┘
//! ```
//!
//! The service never signs or submits; callers sign intents themselves.

pub mod queries;
pub mod types;

use alloy::primitives::{Address, U256};
use std::sync::Arc;

use crate::blockchain::client::LedgerGateway;
use crate::blockchain::contract::{ContractBinding, Voting};
use crate::blockchain::intent::TransactionIntent;
use crate::blockchain::transaction::IntentBuilder;
use crate::blockchain::types::BlockchainResult;
use crate::config::FeeConfig;

pub use queries::ReadQueryExecutor;
pub use types::{Candidate, CandidateWithVotes};

/// Entry point for the four voting operations.
#[derive(Clone)]
pub struct VotingService {
    intents: IntentBuilder,
    queries: ReadQueryExecutor,
}

impl VotingService {
    pub fn new(gateway: Arc<dyn LedgerGateway>, binding: ContractBinding, fees: FeeConfig) -> Self {
        Self {
            intents: IntentBuilder::new(gateway.clone(), binding.clone(), fees),
            queries: ReadQueryExecutor::new(gateway, binding),
        }
    }

    /// Intent for `addCandidate`. Only the contract owner's intent will
    /// survive simulation; anyone else gets the contract's revert.
    pub async fn add_candidate(&self, from: Address, candidate: Candidate) -> BlockchainResult<TransactionIntent> {
        let call = Voting::addCandidateCall {
            candidate: candidate.into(),
        };
        let intent = self.intents.build(from, &call).await?;
        tracing::debug!(from = %from, nonce = intent.nonce, "Built addCandidate intent");
        Ok(intent)
    }

    /// Intent for `vote`. Candidate bounds and double voting are the
    /// contract's to enforce.
    pub async fn vote(&self, from: Address, candidate_id: u64) -> BlockchainResult<TransactionIntent> {
        let call = Voting::voteCall {
            candidateId: U256::from(candidate_id),
        };
        let intent = self.intents.build(from, &call).await?;
        tracing::debug!(from = %from, candidate_id, nonce = intent.nonce, "Built vote intent");
        Ok(intent)
    }

    pub async fn list_candidates(&self) -> BlockchainResult<Vec<CandidateWithVotes>> {
        self.queries.list_candidates().await
    }

    pub async fn get_winner(&self) -> BlockchainResult<Candidate> {
        self.queries.get_winner().await
    }
}
