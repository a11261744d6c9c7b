//! Request payloads and query strings

pub mod menu_category;
pub mod menu_item;

pub use menu_category::{
    CategoriesByLanguageQuery, ChangeMenuCategoryPositionRequest, CreateMenuCategoryRequest,
    UpdateMenuCategoryRequest,
};
pub use menu_item::{
    ChangeMenuItemPositionRequest, CreateMenuItemRequest, ItemsByCategoryQuery,
    UpdateMenuItemRequest,
};
