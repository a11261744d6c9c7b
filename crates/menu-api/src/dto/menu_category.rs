// ============================================================================
// Menu API - Menu Category DTOs
// File: crates/menu-api/src/dto/menu_category.rs
// ============================================================================

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use menu_core::domain::{LanguageCode, MenuCategoryPatch, NewMenuCategory, RepositionRequest};

/// Query for `GET /api/v1/menu-categories`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesByLanguageQuery {
    pub language: LanguageCode,
    #[serde(default)]
    pub include_hidden: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuCategoryRequest {
    pub language: LanguageCode,

    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: String,

    pub description: Option<String>,

    #[validate(length(max = 2048, message = "image reference is too long"))]
    pub image: Option<String>,

    #[serde(default)]
    pub hidden: bool,

    pub position: i32,
}

impl From<CreateMenuCategoryRequest> for NewMenuCategory {
    fn from(req: CreateMenuCategoryRequest) -> Self {
        NewMenuCategory {
            language: req.language,
            title: req.title,
            description: req.description,
            image: req.image,
            hidden: req.hidden,
            position: req.position,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuCategoryRequest {
    pub language: Option<LanguageCode>,

    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 2048, message = "image reference must be 1..2048 characters"))]
    pub image: Option<String>,

    pub hidden: Option<bool>,

    pub position: Option<i32>,
}

impl From<UpdateMenuCategoryRequest> for MenuCategoryPatch {
    fn from(req: UpdateMenuCategoryRequest) -> Self {
        MenuCategoryPatch {
            language: req.language,
            title: req.title,
            description: req.description,
            image: req.image,
            hidden: req.hidden,
            position: req.position,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeMenuCategoryPositionRequest {
    pub menu_category_id: Uuid,
    pub old_position: i32,
    pub new_position: i32,
}

impl From<ChangeMenuCategoryPositionRequest> for RepositionRequest {
    fn from(req: ChangeMenuCategoryPositionRequest) -> Self {
        RepositionRequest {
            id: req.menu_category_id,
            old_position: req.old_position,
            new_position: req.new_position,
        }
    }
}
