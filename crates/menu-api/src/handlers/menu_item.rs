// ============================================================================
// Menu API - Menu Item Handlers
// File: crates/menu-api/src/handlers/menu_item.rs
// ============================================================================

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use menu_core::domain::{MenuItem, StatusResponse};

use crate::dto::{ChangeMenuItemPositionRequest, CreateMenuItemRequest, UpdateMenuItemRequest};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// GET /api/v1/menu-items/{id}
pub async fn find_by_id(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<MenuItem> {
    let Path(id) = id?;
    let item = state.items.find_by_id(&id).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// POST /api/v1/menu-items
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateMenuItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<MenuItem>>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let item = state.items.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

/// PATCH /api/v1/menu-items/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateMenuItemRequest>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let item = state.items.update(&id, payload.into()).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// POST /api/v1/menu-items/position
pub async fn change_position(
    State(state): State<AppState>,
    payload: Result<Json<ChangeMenuItemPositionRequest>, JsonRejection>,
) -> ApiResult<MenuItem> {
    let Json(payload) = payload?;
    let item = state.items.change_position(payload.into()).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// DELETE /api/v1/menu-items/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusResponse> {
    let Path(id) = id?;
    let status = state.items.delete(&id).await?;
    Ok(Json(ApiResponse::deleted(status)))
}
