// ============================================================================
// Menu API - Menu Item DTOs
// File: crates/menu-api/src/dto/menu_item.rs
// ============================================================================

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use menu_core::domain::{LanguageCode, MenuItemPatch, NewMenuItem, RepositionRequest};

/// Query for `GET /api/v1/menu-categories/{id}/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsByCategoryQuery {
    pub language: Option<LanguageCode>,
    #[serde(default = "include_hidden_default")]
    pub include_hidden: bool,
}

fn include_hidden_default() -> bool {
    true
}

/// Accepts plain decimals such as `12`, `12.5` or `0.99`.
fn validate_price(price: &str) -> Result<(), ValidationError> {
    let price = price.trim();
    let (whole, fraction) = match price.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (price, None),
    };

    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if digits(whole) && fraction.map_or(true, digits) {
        Ok(())
    } else {
        let mut err = ValidationError::new("price");
        err.message = Some("price must be a decimal number".into());
        Err(err)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    pub language: LanguageCode,

    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: String,

    #[serde(default)]
    pub hidden: bool,

    pub position: i32,

    pub category_id: Uuid,
}

impl From<CreateMenuItemRequest> for NewMenuItem {
    fn from(req: CreateMenuItemRequest) -> Self {
        NewMenuItem {
            language: req.language,
            title: req.title,
            description: req.description,
            price: req.price,
            hidden: req.hidden,
            position: req.position,
            category_id: req.category_id,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    pub language: Option<LanguageCode>,

    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    pub price: Option<String>,

    pub hidden: Option<bool>,

    pub position: Option<i32>,

    pub category_id: Option<Uuid>,
}

impl From<UpdateMenuItemRequest> for MenuItemPatch {
    fn from(req: UpdateMenuItemRequest) -> Self {
        MenuItemPatch {
            language: req.language,
            title: req.title,
            description: req.description,
            price: req.price,
            hidden: req.hidden,
            position: req.position,
            category_id: req.category_id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeMenuItemPositionRequest {
    pub menu_item_id: Uuid,
    pub old_position: i32,
    pub new_position: i32,
}

impl From<ChangeMenuItemPositionRequest> for RepositionRequest {
    fn from(req: ChangeMenuItemPositionRequest) -> Self {
        RepositionRequest {
            id: req.menu_item_id,
            old_position: req.old_position,
            new_position: req.new_position,
        }
    }
}
