//! Signing and submission relay for non-production deployments.
//!
//! Signing and submission are separate operations so that a production
//! deployment can drop signing entirely and keep only submission, or drop
//! both by not mounting the testnet routes.

use alloy::primitives::{Bytes, TxHash};
use std::sync::Arc;

use crate::blockchain::client::{CallRequest, LedgerGateway};
use crate::blockchain::intent::{SignedTransaction, TransactionIntent};
use crate::blockchain::revert::ContractRevert;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::{DecodedTransaction, TestnetSigner};

/// Moves signed transactions from client custody to chain inclusion.
#[derive(Clone)]
pub struct SubmissionRelay {
    gateway: Arc<dyn LedgerGateway>,
}

impl SubmissionRelay {
    pub fn new(gateway: Arc<dyn LedgerGateway>) -> Self {
        Self { gateway }
    }

    /// Sign an intent with a caller-supplied key. Never touches the node.
    ///
    /// WARNING: must never be used with mainnet private keys.
    pub fn sign(&self, intent: &TransactionIntent, private_key: &str) -> BlockchainResult<SignedTransaction> {
        TestnetSigner::from_private_key(private_key)?.sign(intent)
    }

    /// Submit a signed transaction and wait for inclusion.
    ///
    /// A transaction that is mined but reverts is replayed as a call at its
    /// block so the revert reason can be reported.
    pub async fn submit(&self, raw: &Bytes) -> BlockchainResult<TxHash> {
        let decoded = DecodedTransaction::decode(raw)?;

        let inclusion = self.gateway.submit_raw_transaction(raw).await?;
        if inclusion.success {
            tracing::info!(
                tx_hash = %inclusion.transaction_hash,
                from = %decoded.from,
                nonce = decoded.nonce,
                block = ?inclusion.block_number,
                "Transaction included"
            );
            return Ok(inclusion.transaction_hash);
        }

        let revert = self.replay_reason(&decoded, inclusion.block_number).await;
        tracing::info!(
            tx_hash = %inclusion.transaction_hash,
            reason = %revert.reason,
            "Transaction reverted"
        );
        Err(BlockchainError::ContractRevert(revert))
    }

    async fn replay_reason(&self, decoded: &DecodedTransaction, block: Option<u64>) -> ContractRevert {
        let Some(to) = decoded.to else {
            return ContractRevert::mined("");
        };

        let mut call = CallRequest::new(to, decoded.input.clone()).from(decoded.from);
        // The inclusion block's state holds the effects of transactions
        // mined before this one in the same block.
        if let Some(block) = block {
            call = call.at_block(block);
        }

        match self.gateway.call(&call).await {
            Err(BlockchainError::ContractRevert(simulated)) => ContractRevert::mined(simulated.reason),
            Err(e) => {
                tracing::warn!(error = %e, "Could not replay reverted transaction");
                ContractRevert::mined("")
            }
            Ok(_) => ContractRevert::mined(""),
        }
    }
}
