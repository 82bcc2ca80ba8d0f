//! Failure to status translation at the request boundary.
//!
//! A contract revert is the only failure a client ever sees the details of;
//! everything else becomes an empty 500 and is logged for operators.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::blockchain::types::BlockchainError;

#[derive(Debug)]
pub struct ApiError {
    error: BlockchainError,
    revert_status: StatusCode,
}

impl ApiError {
    /// Reverts surface as 500, the status the voting endpoints use.
    pub fn new(error: BlockchainError) -> Self {
        Self {
            error,
            revert_status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Status to answer with when the failure is a contract revert.
    pub fn revert_status(mut self, status: StatusCode) -> Self {
        self.revert_status = status;
        self
    }
}

impl From<BlockchainError> for ApiError {
    fn from(error: BlockchainError) -> Self {
        Self::new(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.error {
            BlockchainError::ContractRevert(revert) => {
                tracing::warn!(
                    reason = %revert.reason,
                    name = %revert.name,
                    code = revert.code,
                    "Contract reverted"
                );
                (self.revert_status, Json(revert)).into_response()
            }
            other => {
                tracing::warn!(error = %other, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
