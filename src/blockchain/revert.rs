//! Contract revert decoding.
//!
//! Nodes report reverts as JSON-RPC errors whose `data` member carries the
//! ABI-encoded revert payload. The shape handed to HTTP clients mirrors the
//! web3 error objects they already understand: `{reason, name, code, message}`.

use std::fmt;

use alloy::hex;
use alloy::rpc::json_rpc::ErrorPayload;
use alloy::sol_types::{Panic, Revert, SolError};
use serde::{Deserialize, Serialize};

/// JSON-RPC error code used by geth/anvil for execution reverts.
pub const EXECUTION_REVERTED_CODE: i64 = 3;

/// Error name reported for reverts observed while simulating a call.
pub const CONTRACT_EXECUTION_ERROR: &str = "ContractExecutionError";
/// Error code reported for reverts observed while simulating a call.
pub const CONTRACT_EXECUTION_ERROR_CODE: i64 = 310;

/// Error name reported for transactions that were mined and reverted.
pub const TRANSACTION_REVERT_ERROR: &str = "TransactionRevertInstructionError";
/// Error code reported for transactions that were mined and reverted.
pub const TRANSACTION_REVERT_ERROR_CODE: i64 = 402;

const FALLBACK_REASON: &str = "execution reverted";

/// A structured contract-level rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRevert {
    pub reason: String,
    pub name: String,
    pub code: i64,
    pub message: String,
}

impl ContractRevert {
    /// Revert seen while simulating a call (`eth_call`, `eth_estimateGas`).
    pub fn simulated(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            reason: non_empty(reason.into()),
            name: CONTRACT_EXECUTION_ERROR.to_string(),
            code: CONTRACT_EXECUTION_ERROR_CODE,
            message: message.into(),
        }
    }

    /// Revert of a transaction that was included in a block.
    pub fn mined(reason: impl Into<String>) -> Self {
        Self {
            reason: non_empty(reason.into()),
            name: TRANSACTION_REVERT_ERROR.to_string(),
            code: TRANSACTION_REVERT_ERROR_CODE,
            message: "Transaction has been reverted by the EVM".to_string(),
        }
    }

    /// Interpret a JSON-RPC error payload, returning `None` when it is not a revert.
    pub fn from_error_payload(payload: &ErrorPayload) -> Option<Self> {
        let message = payload.message.to_string();
        if payload.code != EXECUTION_REVERTED_CODE && !message.to_lowercase().contains("revert") {
            return None;
        }

        let reason = payload
            .data
            .as_ref()
            .and_then(|raw| revert_data(raw.get()))
            .and_then(|data| decode_reason(&data))
            .unwrap_or_else(|| reason_from_message(&message));

        Some(Self::simulated(reason, message))
    }
}

impl fmt::Display for ContractRevert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.code, self.reason)
    }
}

/// Decode an ABI revert payload into a human-readable reason.
///
/// Handles `Error(string)` and `Panic(uint256)`; anything else yields `None`.
pub fn decode_reason(data: &[u8]) -> Option<String> {
    if let Ok(revert) = Revert::abi_decode(data) {
        return Some(revert.reason);
    }
    if let Ok(panic) = Panic::abi_decode(data) {
        return Some(format!("panic code 0x{:x}", panic.code));
    }
    None
}

/// Pull the hex payload out of the `data` member. Nodes send either the hex
/// string directly or an object wrapping it under `data`.
fn revert_data(raw: &str) -> Option<Vec<u8>> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let encoded = match &value {
        serde_json::Value::String(s) => s.as_str(),
        serde_json::Value::Object(map) => map.get("data")?.as_str()?,
        _ => return None,
    };
    hex::decode(encoded).ok().filter(|bytes| !bytes.is_empty())
}

fn reason_from_message(message: &str) -> String {
    let trimmed = message
        .strip_prefix("execution reverted")
        .map(|rest| rest.trim_start_matches(':').trim())
        .unwrap_or(message);
    non_empty(trimmed.to_string())
}

fn non_empty(reason: String) -> String {
    if reason.trim().is_empty() {
        FALLBACK_REASON.to_string()
    } else {
        reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    fn payload(json: &str) -> ErrorPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_error_string() {
        let data = Revert { reason: "Invalid candidate".to_string() }.abi_encode();
        assert_eq!(decode_reason(&data).as_deref(), Some("Invalid candidate"));
    }

    #[test]
    fn test_decode_panic() {
        let data = Panic { code: U256::from(0x32) }.abi_encode();
        assert_eq!(decode_reason(&data).as_deref(), Some("panic code 0x32"));
    }

    #[test]
    fn test_decode_unknown_selector() {
        assert!(decode_reason(&[0xde, 0xad, 0xbe, 0xef]).is_none());
    }

    #[test]
    fn test_payload_with_revert_data() {
        let data = hex::encode_prefixed(Revert { reason: "Invalid candidate".to_string() }.abi_encode());
        let json = format!(
            r#"{{"code":3,"message":"execution reverted: Invalid candidate","data":"{}"}}"#,
            data
        );
        let revert = ContractRevert::from_error_payload(&payload(&json)).unwrap();
        assert_eq!(revert.reason, "Invalid candidate");
        assert_eq!(revert.name, CONTRACT_EXECUTION_ERROR);
        assert_eq!(revert.code, CONTRACT_EXECUTION_ERROR_CODE);
        assert_eq!(revert.message, "execution reverted: Invalid candidate");
    }

    #[test]
    fn test_payload_with_nested_data() {
        let data = hex::encode_prefixed(Revert { reason: "Already voted".to_string() }.abi_encode());
        let json = format!(
            r#"{{"code":-32000,"message":"execution reverted","data":{{"data":"{}"}}}}"#,
            data
        );
        let revert = ContractRevert::from_error_payload(&payload(&json)).unwrap();
        assert_eq!(revert.reason, "Already voted");
    }

    #[test]
    fn test_payload_without_data_uses_message() {
        let revert = ContractRevert::from_error_payload(&payload(
            r#"{"code":3,"message":"execution reverted: Voting closed"}"#,
        ))
        .unwrap();
        assert_eq!(revert.reason, "Voting closed");
    }

    #[test]
    fn test_bare_revert_has_reason() {
        let revert = ContractRevert::from_error_payload(&payload(
            r#"{"code":3,"message":"execution reverted","data":"0x"}"#,
        ))
        .unwrap();
        assert_eq!(revert.reason, "execution reverted");
    }

    #[test]
    fn test_non_revert_payload() {
        let result = ContractRevert::from_error_payload(&payload(
            r#"{"code":-32003,"message":"nonce too low"}"#,
        ));
        assert!(result.is_none());
    }

    #[test]
    fn test_mined_revert_shape() {
        let revert = ContractRevert::mined("");
        assert_eq!(revert.reason, "execution reverted");
        assert_eq!(revert.code, TRANSACTION_REVERT_ERROR_CODE);

        let json = serde_json::to_value(&revert).unwrap();
        assert_eq!(json["name"], TRANSACTION_REVERT_ERROR);
        assert!(json.get("reason").is_some());
    }
}
