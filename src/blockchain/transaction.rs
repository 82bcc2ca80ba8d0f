//! Transaction intent construction.
//!
//! # Responsibilities
//! - Encode the contract call
//! - Fetch fee data, nonce and chain id concurrently, failing fast
//! - Guard against fee spikes
//! - Assemble an unsigned intent for the caller's own wallet to sign
//!
//! Nothing here signs or submits.

use alloy::primitives::{Address, Bytes};
use alloy::sol_types::SolCall;
use std::sync::Arc;

use crate::blockchain::client::{CallRequest, LedgerGateway};
use crate::blockchain::contract::ContractBinding;
use crate::blockchain::intent::{FeeFields, TransactionIntent};
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::config::{FeeConfig, FeeModel};

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Builds unsigned transaction intents against the voting contract.
#[derive(Clone)]
pub struct IntentBuilder {
    gateway: Arc<dyn LedgerGateway>,
    binding: ContractBinding,
    fees: FeeConfig,
}

impl IntentBuilder {
    pub fn new(gateway: Arc<dyn LedgerGateway>, binding: ContractBinding, fees: FeeConfig) -> Self {
        Self {
            gateway,
            binding,
            fees,
        }
    }

    /// Build an intent for `call` sent from `from`.
    ///
    /// The three node queries are independent and run concurrently. Any
    /// failure aborts the whole intent; a partial intent is never returned.
    pub async fn build<C: SolCall>(&self, from: Address, call: &C) -> BlockchainResult<TransactionIntent> {
        let to = self.binding.address();
        let data = self.binding.encode(call);

        let (fees, nonce, chain_id) = tokio::try_join!(
            self.fee_fields(from, to, &data),
            self.gateway.transaction_count(from),
            self.gateway.chain_id(),
        )?;

        tracing::debug!(
            method = C::SIGNATURE,
            from = %from,
            nonce,
            chain_id,
            estimated_gas = fees.estimated_gas(),
            "Transaction intent built"
        );

        Ok(TransactionIntent {
            from,
            to,
            data,
            nonce,
            chain_id,
            fees,
        })
    }

    /// Gas estimate plus pricing for the configured fee model.
    ///
    /// The estimate doubles as a static check: a call that would revert
    /// surfaces here as a `ContractRevert`.
    async fn fee_fields(&self, from: Address, to: Address, data: &Bytes) -> BlockchainResult<FeeFields> {
        let call = CallRequest::new(to, data.clone()).from(from);

        let fees = match self.fees.model {
            FeeModel::Legacy => {
                let (estimated_gas, gas_price) =
                    tokio::try_join!(self.gateway.estimate_gas(&call), self.gateway.gas_price())?;
                FeeFields::Legacy {
                    estimated_gas,
                    gas_price,
                }
            }
            FeeModel::FeeMarket => {
                let (estimated_gas, market) =
                    tokio::try_join!(self.gateway.estimate_gas(&call), self.gateway.fee_market())?;
                FeeFields::FeeMarket {
                    estimated_gas,
                    max_fee_per_gas: market.max_fee_per_gas,
                    max_priority_fee_per_gas: market.max_priority_fee_per_gas,
                }
            }
        };

        self.check_fee_cap(&fees)?;
        Ok(fees)
    }

    fn check_fee_cap(&self, fees: &FeeFields) -> BlockchainResult<()> {
        let max_gwei = self.fees.max_fee_per_gas_gwei;
        if max_gwei == 0 {
            return Ok(());
        }

        let price = fees.max_price_per_gas();
        if price > max_gwei as u128 * WEI_PER_GWEI {
            tracing::warn!(price_wei = price, max_gwei, "Fee above configured cap, refusing intent");
            return Err(BlockchainError::FeeTooHigh {
                current_gwei: price / WEI_PER_GWEI,
                max_gwei,
            });
        }
        Ok(())
    }
}
