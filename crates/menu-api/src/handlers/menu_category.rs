// ============================================================================
// Menu API - Menu Category Handlers
// File: crates/menu-api/src/handlers/menu_category.rs
// ============================================================================

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use menu_core::domain::{MenuCategory, MenuItem, StatusResponse};

use crate::dto::{
    CategoriesByLanguageQuery, ChangeMenuCategoryPositionRequest, CreateMenuCategoryRequest,
    ItemsByCategoryQuery, UpdateMenuCategoryRequest,
};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// GET /api/v1/menu-categories?language=en&includeHidden=false
pub async fn find_by_language(
    State(state): State<AppState>,
    query: Result<Query<CategoriesByLanguageQuery>, QueryRejection>,
) -> ApiResult<Vec<MenuCategory>> {
    let Query(query) = query?;
    let categories = state
        .categories
        .find_by_language(query.language, query.include_hidden)
        .await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// GET /api/v1/menu-categories/all
pub async fn find_all(State(state): State<AppState>) -> ApiResult<Vec<MenuCategory>> {
    let categories = state.categories.find_all().await?;
    Ok(Json(ApiResponse::success(categories)))
}

/// GET /api/v1/menu-categories/{id}
pub async fn find_by_id(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<MenuCategory> {
    let Path(id) = id?;
    let category = state.categories.find_by_id(&id).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// GET /api/v1/menu-categories/{id}/items
pub async fn find_items(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<ItemsByCategoryQuery>, QueryRejection>,
) -> ApiResult<Vec<MenuItem>> {
    let Path(id) = id?;
    let Query(query) = query?;
    let items = state
        .items
        .find_by_category(&id, query.language, query.include_hidden)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

/// POST /api/v1/menu-categories
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateMenuCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<MenuCategory>>), ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let category = state.categories.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(category))))
}

/// PATCH /api/v1/menu-categories/{id}
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateMenuCategoryRequest>, JsonRejection>,
) -> ApiResult<MenuCategory> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let category = state.categories.update(&id, payload.into()).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// POST /api/v1/menu-categories/position
pub async fn change_position(
    State(state): State<AppState>,
    payload: Result<Json<ChangeMenuCategoryPositionRequest>, JsonRejection>,
) -> ApiResult<MenuCategory> {
    let Json(payload) = payload?;
    let category = state.categories.change_position(payload.into()).await?;
    Ok(Json(ApiResponse::success(category)))
}

/// DELETE /api/v1/menu-categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<StatusResponse> {
    let Path(id) = id?;
    let status = state.categories.delete(&id).await?;
    Ok(Json(ApiResponse::deleted(status)))
}
