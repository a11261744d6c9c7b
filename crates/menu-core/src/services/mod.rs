//! Domain services (business logic)

pub mod menu_category_service;
pub mod menu_item_service;
pub mod reorder_engine;

pub use menu_category_service::MenuCategoryService;
pub use menu_item_service::MenuItemService;
pub use reorder_engine::ReorderEngine;
