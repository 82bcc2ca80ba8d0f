//! Testnet transaction signing.
//!
//! # Security
//! - Only for throwaway testnet keys; the key arrives with the request
//! - Keys are never logged, stored or serialized
//! - Signing is purely local; nothing here touches the node

use alloy::consensus::{SignableTransaction, Signed, TxEip1559, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::{Decodable2718, Encodable2718};
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, Signature, TxKind, U256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::Signer;

use crate::blockchain::intent::{FeeFields, SignedTransaction, TransactionIntent};
use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Signer built from a caller-supplied private key.
#[derive(Debug)]
pub struct TestnetSigner {
    signer: PrivateKeySigner,
}

impl TestnetSigner {
    /// Create a signer from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Signing(format!("Invalid private key format: {}", e)))?;

        Ok(Self { signer })
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign an intent. Legacy intents become EIP-155 transactions, fee-market
    /// intents become EIP-1559 transactions.
    pub fn sign(&self, intent: &TransactionIntent) -> BlockchainResult<SignedTransaction> {
        if intent.from != self.address() {
            tracing::warn!(
                intent_from = %intent.from,
                signer = %self.address(),
                "Signing key does not match intent sender"
            );
        }

        let envelope = match intent.fees {
            FeeFields::Legacy {
                estimated_gas,
                gas_price,
            } => {
                let tx = TxLegacy {
                    chain_id: Some(intent.chain_id),
                    nonce: intent.nonce,
                    gas_price,
                    gas_limit: estimated_gas,
                    to: TxKind::Call(intent.to),
                    value: U256::ZERO,
                    input: intent.data.clone(),
                    ..Default::default()
                };
                TxEnvelope::from(self.sign_tx(tx)?)
            }
            FeeFields::FeeMarket {
                estimated_gas,
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => {
                let tx = TxEip1559 {
                    chain_id: intent.chain_id,
                    nonce: intent.nonce,
                    gas_limit: estimated_gas,
                    max_fee_per_gas,
                    max_priority_fee_per_gas,
                    to: TxKind::Call(intent.to),
                    value: U256::ZERO,
                    input: intent.data.clone(),
                    ..Default::default()
                };
                TxEnvelope::from(self.sign_tx(tx)?)
            }
        };

        let signed = SignedTransaction {
            raw_transaction: Bytes::from(envelope.encoded_2718()),
            transaction_hash: *envelope.tx_hash(),
        };
        tracing::debug!(tx_hash = %signed.transaction_hash, nonce = intent.nonce, "Transaction signed");
        Ok(signed)
    }

    fn sign_tx<T: SignableTransaction<Signature>>(&self, mut tx: T) -> BlockchainResult<Signed<T>> {
        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| BlockchainError::Signing(format!("Signing failed: {}", e)))?;
        Ok(tx.into_signed(signature))
    }
}

/// The fields of a raw signed transaction the relay and tests care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub from: Address,
    pub to: Option<Address>,
    pub nonce: u64,
    pub chain_id: Option<u64>,
    pub input: Bytes,
}

impl DecodedTransaction {
    /// Decode an EIP-2718 payload and recover its sender.
    ///
    /// Only legacy and EIP-1559 transactions are produced by this service,
    /// so other types are rejected.
    pub fn decode(raw: &[u8]) -> BlockchainResult<Self> {
        let mut buf = raw;
        let envelope = TxEnvelope::decode_2718(&mut buf)
            .map_err(|e| BlockchainError::Decoding(format!("Malformed signed transaction: {}", e)))?;

        match &envelope {
            TxEnvelope::Legacy(signed) => {
                let tx = signed.tx();
                Ok(Self {
                    from: recover_sender(signed)?,
                    to: tx.to.to().copied(),
                    nonce: tx.nonce,
                    chain_id: tx.chain_id,
                    input: tx.input.clone(),
                })
            }
            TxEnvelope::Eip1559(signed) => {
                let tx = signed.tx();
                Ok(Self {
                    from: recover_sender(signed)?,
                    to: tx.to.to().copied(),
                    nonce: tx.nonce,
                    chain_id: Some(tx.chain_id),
                    input: tx.input.clone(),
                })
            }
            _ => Err(BlockchainError::Decoding(
                "Unsupported transaction type".to_string(),
            )),
        }
    }
}

fn recover_sender<T: SignableTransaction<Signature>>(signed: &Signed<T>) -> BlockchainResult<Address> {
    let sighash = signed.tx().signature_hash();
    signed
        .signature()
        .recover_address_from_prehash(&sighash)
        .map_err(|e| BlockchainError::Decoding(format!("Cannot recover sender: {}", e)))
}
