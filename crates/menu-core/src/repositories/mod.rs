//! Repository traits (ports)

pub mod menu_category_repository;
pub mod menu_item_repository;
pub mod position_store;

pub use menu_category_repository::MenuCategoryRepository;
pub use menu_item_repository::MenuItemRepository;
pub use position_store::{PositionStore, PositionTransaction};

#[cfg(test)]
pub use menu_category_repository::MockMenuCategoryRepository;
#[cfg(test)]
pub use menu_item_repository::MockMenuItemRepository;
