//! Claims handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use validator::Validate;

use core_kernel::ClaimId;

use crate::auth::Claims;
use crate::dto::claims::{
    AddMessageRequest, ApproveClaimRequest, ClaimResponse, ReconciliationResponse,
    VerifyClaimRequest,
};
use crate::{error::ApiError, AppState};

/// The calling user's own claims
pub async fn my_claims(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let list = state.service.list_my_claims(claims.user_id()?).await;
    Ok(Json(list.into_iter().map(Into::into).collect()))
}

/// Faculty verification queue, newest first
pub async fn list_pending(State(state): State<AppState>) -> Json<Vec<ClaimResponse>> {
    let list = state.service.list_pending_claims().await;
    Json(list.into_iter().map(Into::into).collect())
}

/// Records an approve/reject decision
pub async fn verify_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<ClaimId>,
    Json(request): Json<VerifyClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state
        .service
        .verify_claim(id, request.decision, request.note, Some(claims.user_id()?))
        .await?;
    Ok(Json(claim.into()))
}

/// Approves a claim; safe to repeat after a partial failure
pub async fn approve_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<ClaimId>,
    request: Option<Json<ApproveClaimRequest>>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let claim = state
        .service
        .approve_claim(id, request.note, Some(claims.user_id()?))
        .await?;
    Ok(Json(claim.into()))
}

/// Repairs approvals whose item write never landed
pub async fn reconcile(
    State(state): State<AppState>,
) -> Result<Json<ReconciliationResponse>, ApiError> {
    let report = state.service.reconcile_approvals().await?;
    Ok(Json(report.into()))
}

/// Appends a message to a claim's conversation
pub async fn add_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<ClaimId>,
    Json(request): Json<AddMessageRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    request.validate()?;
    let claim = state
        .service
        .add_claim_message(id, claims.user_id()?, &request.text)
        .await?;
    Ok(Json(claim.into()))
}
