//! Ledger gateway: the single connection to the blockchain node.
//!
//! # Responsibilities
//! - Connect to one JSON-RPC endpoint for the life of the process
//! - Query fee data, nonces and the chain id
//! - Simulate calls and submit raw signed transactions
//! - Classify node failures into reverts and everything else
//!
//! No retries and no timeouts live here. A failed query is reported to the
//! caller immediately; the underlying transport error is passed through.

use alloy::eips::BlockId;
use alloy::network::{ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::{RpcError, TransportErrorKind};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::blockchain::revert::ContractRevert;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::LedgerConfig;
use crate::observability::metrics;

/// A contract call to simulate or estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    /// Block to execute against; latest when `None`.
    pub block: Option<u64>,
}

impl CallRequest {
    pub fn new(to: Address, data: Bytes) -> Self {
        Self {
            from: None,
            to,
            data,
            block: None,
        }
    }

    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn at_block(mut self, block: u64) -> Self {
        self.block = Some(block);
        self
    }

    fn to_request(&self) -> TransactionRequest {
        let mut tx = TransactionRequest::default()
            .with_to(self.to)
            .with_input(self.data.clone());
        if let Some(from) = self.from {
            tx = tx.with_from(from);
        }
        tx
    }
}

/// EIP-1559 fee caps suggested by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeMarketEstimate {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

/// Outcome of a submitted transaction once it was included in a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inclusion {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    /// Receipt status; `false` means the transaction reverted.
    pub success: bool,
}

/// Query and submission primitives exposed by the node.
///
/// Shared read-only by every request handler.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Current legacy gas price in wei.
    async fn gas_price(&self) -> BlockchainResult<u128>;

    /// Current EIP-1559 fee suggestion.
    async fn fee_market(&self) -> BlockchainResult<FeeMarketEstimate>;

    /// Transaction count (next nonce) for an address.
    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64>;

    async fn chain_id(&self) -> BlockchainResult<u64>;

    /// Gas needed for a call. Reverts if the call would revert.
    async fn estimate_gas(&self, call: &CallRequest) -> BlockchainResult<u64>;

    /// Execute a call without creating a transaction.
    async fn call(&self, call: &CallRequest) -> BlockchainResult<Bytes>;

    /// Send a signed transaction and wait for it to be included.
    async fn submit_raw_transaction(&self, raw: &Bytes) -> BlockchainResult<Inclusion>;
}

/// JSON-RPC backed gateway.
#[derive(Clone)]
pub struct RpcGateway {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
}

impl RpcGateway {
    /// Create a gateway for the configured endpoint.
    ///
    /// The HTTP transport connects lazily, so this succeeds even while the
    /// node is down; the first query reports the failure.
    pub fn connect(config: &LedgerConfig) -> BlockchainResult<Self> {
        let url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::GatewayUnavailable(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let provider = Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>;

        tracing::info!(rpc_url = %config.rpc_url, "Ledger gateway initialized");

        Ok(Self {
            provider,
            rpc_url: config.rpc_url.clone(),
        })
    }

    /// Endpoint this gateway talks to.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

impl std::fmt::Debug for RpcGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcGateway")
            .field("rpc_url", &self.rpc_url)
            .finish()
    }
}

#[async_trait]
impl LedgerGateway for RpcGateway {
    async fn gas_price(&self) -> BlockchainResult<u128> {
        observe("eth_gasPrice", async { self.provider.get_gas_price().await }).await
    }

    async fn fee_market(&self) -> BlockchainResult<FeeMarketEstimate> {
        let estimate = observe("eth_feeHistory", self.provider.estimate_eip1559_fees()).await?;
        Ok(FeeMarketEstimate {
            max_fee_per_gas: estimate.max_fee_per_gas,
            max_priority_fee_per_gas: estimate.max_priority_fee_per_gas,
        })
    }

    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        observe("eth_getTransactionCount", async {
            self.provider.get_transaction_count(address).await
        })
        .await
    }

    async fn chain_id(&self) -> BlockchainResult<u64> {
        observe("eth_chainId", async { self.provider.get_chain_id().await }).await
    }

    async fn estimate_gas(&self, call: &CallRequest) -> BlockchainResult<u64> {
        let tx = call.to_request();
        observe("eth_estimateGas", async { self.provider.estimate_gas(tx).await }).await
    }

    async fn call(&self, call: &CallRequest) -> BlockchainResult<Bytes> {
        let tx = call.to_request();
        let block = call.block;
        observe("eth_call", async {
            match block {
                Some(number) => self.provider.call(tx).block(BlockId::number(number)).await,
                None => self.provider.call(tx).await,
            }
        })
        .await
    }

    async fn submit_raw_transaction(&self, raw: &Bytes) -> BlockchainResult<Inclusion> {
        let pending = observe("eth_sendRawTransaction", self.provider.send_raw_transaction(raw)).await?;
        let transaction_hash = *pending.tx_hash();
        tracing::debug!(tx_hash = %transaction_hash, "Transaction accepted, awaiting receipt");

        let receipt = pending.get_receipt().await.map_err(|e| {
            BlockchainError::GatewayUnavailable(format!("Awaiting receipt for {} failed: {}", transaction_hash, e))
        })?;

        Ok(Inclusion {
            transaction_hash,
            block_number: receipt.block_number,
            success: receipt.status(),
        })
    }
}

/// Await a node query, recording its latency and classifying any failure.
async fn observe<T, F>(method: &'static str, fut: F) -> BlockchainResult<T>
where
    F: Future<Output = Result<T, RpcError<TransportErrorKind>>>,
{
    let start = Instant::now();
    let result = fut.await;
    metrics::record_node_call(method, result.is_ok(), start);
    result.map_err(|e| {
        let err = classify_rpc_error(e);
        tracing::debug!(method, error = %err, "Node query failed");
        err
    })
}

/// Split node failures into contract reverts and everything else.
pub fn classify_rpc_error(err: RpcError<TransportErrorKind>) -> BlockchainError {
    if let Some(revert) = err.as_error_resp().and_then(ContractRevert::from_error_payload) {
        return BlockchainError::ContractRevert(revert);
    }
    BlockchainError::GatewayUnavailable(err.to_string())
}
