//! Voting request and response shapes.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::blockchain::contract::Voting;
use crate::blockchain::intent::{checksummed, SignedTransaction, TransactionIntent};

/// A candidate as recorded on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub metadata: String,
}

impl From<Voting::Candidate> for Candidate {
    fn from(candidate: Voting::Candidate) -> Self {
        Self {
            name: candidate.name,
            metadata: candidate.metadata,
        }
    }
}

impl From<Candidate> for Voting::Candidate {
    fn from(candidate: Candidate) -> Self {
        Self {
            name: candidate.name,
            metadata: candidate.metadata,
        }
    }
}

/// A candidate with its vote count as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateWithVotes {
    pub candidate: Candidate,
    pub vote_count: String,
}

/// Body of `POST /voting/candidates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCandidateRequest {
    #[serde(with = "checksummed")]
    pub address: Address,
    pub candidate: Candidate,
}

/// Body of `POST /voting/vote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[serde(with = "checksummed")]
    pub address: Address,
    pub candidate_id: u64,
}

/// Body of `GET /voting/candidates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateList {
    pub candidates: Vec<CandidateWithVotes>,
}

/// Body of `GET /voting/winner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub candidate: Candidate,
}

/// Body of `POST /testnet/sign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignTransactionRequest {
    pub testnet_private_key: String,
    pub transaction_object: TransactionIntent,
}

/// Body of `POST /testnet/submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransactionRequest {
    pub signed_transaction: SignedTransaction,
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    pub transaction_hash: alloy::primitives::TxHash,
}
