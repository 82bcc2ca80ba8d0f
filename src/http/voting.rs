//! `/voting/*` handlers.

use axum::{extract::State, Json};

use crate::blockchain::intent::TransactionIntent;
use crate::http::error::ApiError;
use crate::http::extract::ApiJson;
use crate::http::server::AppState;
use crate::voting::types::{AddCandidateRequest, CandidateList, VoteRequest, Winner};

pub async fn add_candidate(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AddCandidateRequest>,
) -> Result<Json<TransactionIntent>, ApiError> {
    let intent = state.voting.add_candidate(request.address, request.candidate).await?;
    Ok(Json(intent))
}

pub async fn list_candidates(State(state): State<AppState>) -> Result<Json<CandidateList>, ApiError> {
    let candidates = state.voting.list_candidates().await?;
    Ok(Json(CandidateList { candidates }))
}

pub async fn vote(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> Result<Json<TransactionIntent>, ApiError> {
    let intent = state.voting.vote(request.address, request.candidate_id).await?;
    Ok(Json(intent))
}

pub async fn winner(State(state): State<AppState>) -> Result<Json<Winner>, ApiError> {
    let candidate = state.voting.get_winner().await?;
    Ok(Json(Winner { candidate }))
}
