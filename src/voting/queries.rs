//! Read query executor.
//!
//! Calls the contract's view methods and normalizes the returned tuples into
//! boundary types. Integers become decimal strings; nothing from the ABI
//! layer leaks past this module. Order is whatever the contract returns.

use alloy::sol_types::SolCall;
use std::sync::Arc;

use crate::blockchain::client::{CallRequest, LedgerGateway};
use crate::blockchain::contract::{ContractBinding, Voting};
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::voting::types::{Candidate, CandidateWithVotes};

#[derive(Clone)]
pub struct ReadQueryExecutor {
    gateway: Arc<dyn LedgerGateway>,
    binding: ContractBinding,
}

impl ReadQueryExecutor {
    pub fn new(gateway: Arc<dyn LedgerGateway>, binding: ContractBinding) -> Self {
        Self { gateway, binding }
    }

    /// All candidates with their vote counts, in contract order.
    pub async fn list_candidates(&self) -> BlockchainResult<Vec<CandidateWithVotes>> {
        let raw = self.query(&Voting::getCandidatesCall {}).await?;
        let entries = Voting::getCandidatesCall::abi_decode_returns(&raw).map_err(decoding("getCandidates"))?;
        Ok(entries.into_iter().map(normalize_entry).collect())
    }

    /// The contract's current winner, passed through unchanged.
    pub async fn get_winner(&self) -> BlockchainResult<Candidate> {
        let raw = self.query(&Voting::getWinnerCall {}).await?;
        let winner = Voting::getWinnerCall::abi_decode_returns(&raw).map_err(decoding("getWinner"))?;
        Ok(Candidate::from(winner))
    }

    async fn query<C: SolCall>(&self, call: &C) -> BlockchainResult<alloy::primitives::Bytes> {
        let request = CallRequest::new(self.binding.address(), self.binding.encode(call));
        self.gateway.call(&request).await
    }
}

fn normalize_entry(entry: Voting::CandidateWithVotes) -> CandidateWithVotes {
    CandidateWithVotes {
        candidate: Candidate::from(entry.candidate),
        vote_count: entry.voteCount.to_string(),
    }
}

fn decoding(method: &'static str) -> impl Fn(alloy::sol_types::Error) -> BlockchainError {
    move |e| BlockchainError::Decoding(format!("Unexpected {} result: {}", method, e))
}
