//! `/testnet/*` handlers.
//!
//! Signing takes the private key in the request body. These routes exist for
//! local development and are only mounted when `testnet.enabled` is set.

use axum::{extract::State, http::StatusCode, Json};

use crate::blockchain::intent::SignedTransaction;
use crate::http::error::ApiError;
use crate::http::extract::ApiJson;
use crate::http::server::AppState;
use crate::voting::types::{SignTransactionRequest, SubmitTransactionRequest, TransactionResult};

pub async fn sign(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignTransactionRequest>,
) -> Result<Json<SignedTransaction>, ApiError> {
    let signed = state
        .relay
        .sign(&request.transaction_object, &request.testnet_private_key)?;
    Ok(Json(signed))
}

pub async fn submit(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SubmitTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionResult>), ApiError> {
    let transaction_hash = state
        .relay
        .submit(&request.signed_transaction.raw_transaction)
        .await
        .map_err(|e| ApiError::new(e).revert_status(StatusCode::BAD_REQUEST))?;
    Ok((StatusCode::CREATED, Json(TransactionResult { transaction_hash })))
}
