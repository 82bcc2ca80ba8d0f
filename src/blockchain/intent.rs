//! Transaction intent and signed transaction wire types.
//!
//! Every integer crosses the HTTP boundary as a decimal string so that
//! clients never round ledger values through floating point. Addresses are
//! always emitted in their EIP-55 checksummed form.

use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// An unsigned, fully-parameterized contract call ready for a wallet to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIntent {
    #[serde(with = "checksummed")]
    pub from: Address,
    #[serde(with = "checksummed")]
    pub to: Address,
    /// ABI-encoded call payload.
    pub data: Bytes,
    #[serde(with = "decimal")]
    pub nonce: u64,
    #[serde(with = "decimal")]
    pub chain_id: u64,
    #[serde(flatten)]
    pub fees: FeeFields,
}

/// Pricing of an intent. Exactly one variant per intent, chosen process-wide.
///
/// `estimatedGas` is the gas limit in both variants; the variant itself is
/// identified by its pricing fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeeFields {
    #[serde(rename_all = "camelCase")]
    Legacy {
        #[serde(with = "decimal")]
        estimated_gas: u64,
        #[serde(with = "decimal")]
        gas_price: u128,
    },
    #[serde(rename_all = "camelCase")]
    FeeMarket {
        #[serde(with = "decimal")]
        estimated_gas: u64,
        #[serde(with = "decimal")]
        max_fee_per_gas: u128,
        #[serde(with = "decimal")]
        max_priority_fee_per_gas: u128,
    },
}

impl FeeFields {
    /// Gas limit for the transaction.
    pub fn estimated_gas(&self) -> u64 {
        match self {
            FeeFields::Legacy { estimated_gas, .. } | FeeFields::FeeMarket { estimated_gas, .. } => {
                *estimated_gas
            }
        }
    }

    /// The highest per-gas price this intent may pay, in wei.
    pub fn max_price_per_gas(&self) -> u128 {
        match self {
            FeeFields::Legacy { gas_price, .. } => *gas_price,
            FeeFields::FeeMarket { max_fee_per_gas, .. } => *max_fee_per_gas,
        }
    }
}

/// A signed transaction produced by the testnet signer. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    /// EIP-2718 encoded signed transaction.
    pub raw_transaction: Bytes,
    /// Informational on submit; the hash is recomputed from the payload.
    #[serde(default)]
    pub transaction_hash: B256,
}

/// Decimal-string (de)serialization for integers.
///
/// Deserialization also accepts JSON numbers and `0x`-prefixed hex strings,
/// which some wallets send back unchanged.
pub mod decimal {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(u64),
    }

    pub fn serialize<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr + TryFrom<u128>,
        <T as FromStr>::Err: Display,
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => T::try_from(n as u128).map_err(|_| de::Error::custom("integer out of range")),
            Repr::Text(s) => match s.strip_prefix("0x") {
                Some(hex) => {
                    let n = u128::from_str_radix(hex, 16).map_err(de::Error::custom)?;
                    T::try_from(n).map_err(|_| de::Error::custom("integer out of range"))
                }
                None => s.parse().map_err(de::Error::custom),
            },
        }
    }
}

/// EIP-55 checksummed address serialization.
pub mod checksummed {
    use alloy::primitives::Address;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&address.to_checksum(None))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes};
    use serde_json::json;

    fn legacy_intent() -> TransactionIntent {
        TransactionIntent {
            from: address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            to: address!("5fbdb2315678afecb367f032d93f642f64180aa3"),
            data: bytes!("deadbeef"),
            nonce: 7,
            chain_id: 31337,
            fees: FeeFields::Legacy {
                estimated_gas: 90_000,
                gas_price: 2_000_000_000,
            },
        }
    }

    #[test]
    fn test_legacy_wire_shape() {
        let json = serde_json::to_value(legacy_intent()).unwrap();
        assert_eq!(
            json,
            json!({
                "from": "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
                "to": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
                "data": "0xdeadbeef",
                "nonce": "7",
                "chainId": "31337",
                "estimatedGas": "90000",
                "gasPrice": "2000000000",
            })
        );
    }

    #[test]
    fn test_fee_market_wire_shape() {
        let mut intent = legacy_intent();
        intent.fees = FeeFields::FeeMarket {
            estimated_gas: 90_000,
            max_fee_per_gas: 3_000_000_000,
            max_priority_fee_per_gas: 1_000_000_000,
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["maxFeePerGas"], "3000000000");
        assert_eq!(json["maxPriorityFeePerGas"], "1000000000");
        assert!(json.get("gasPrice").is_none());

        let parsed: TransactionIntent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, intent);
    }

    #[test]
    fn test_accepts_numbers_and_lowercase_addresses() {
        let parsed: TransactionIntent = serde_json::from_value(json!({
            "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "to": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
            "data": "0xdeadbeef",
            "nonce": 7,
            "chainId": "0x7a69",
            "estimatedGas": "90000",
            "gasPrice": "2000000000",
        }))
        .unwrap();
        assert_eq!(parsed, legacy_intent());
    }

    #[test]
    fn test_rejects_missing_fee_fields() {
        let result = serde_json::from_value::<TransactionIntent>(json!({
            "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
            "to": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
            "data": "0x",
            "nonce": "0",
            "chainId": "31337",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_fee_accessors() {
        let fees = FeeFields::FeeMarket {
            estimated_gas: 21_000,
            max_fee_per_gas: 5,
            max_priority_fee_per_gas: 1,
        };
        assert_eq!(fees.estimated_gas(), 21_000);
        assert_eq!(fees.max_price_per_gas(), 5);
    }
}
