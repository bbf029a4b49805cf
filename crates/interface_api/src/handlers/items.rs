//! Item handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::{ItemId, UserId};
use domain_lostfound::{ItemFilter, NewClaim, NewItem};

use crate::auth::Claims;
use crate::dto::claims::ClaimResponse;
use crate::dto::items::{ItemListQuery, ItemResponse, UpdateItemStatusRequest};
use crate::{error::ApiError, AppState};

/// Lists items; `type`, `category`, `status` and `search` narrow the result
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let filter = ItemFilter::try_from(query)?;
    let items = state.service.list_items(&filter).await;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Gets an item by ID
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<ItemResponse>, ApiError> {
    state
        .service
        .get_item(id)
        .await
        .map(|item| Json(item.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Item not found: {}", id)))
}

/// Files a lost/found report as the calling user
pub async fn create_item(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<NewItem>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let reporter: UserId = claims.user_id()?;
    let item = state.service.create_item(request, reporter).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Overwrites an item's status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(request): Json<UpdateItemStatusRequest>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item = state.service.update_item_status(id, request.status).await?;
    Ok(Json(item.into()))
}

/// Files a claim on an item as the calling user
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<ItemId>,
    Json(request): Json<NewClaim>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state
        .service
        .create_claim(id, request, claims.user_id()?)
        .await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// The calling user's own reports
pub async fn my_reports(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ItemResponse>>, ApiError> {
    let items = state.service.list_my_reports(claims.user_id()?).await;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}
