//! # Menu Core - Domain Module
//! 
//! Domain entities and ordering primitives for the menu service.

pub mod language;
pub mod menu_category;
pub mod menu_item;
pub mod position;
pub mod status;

// Re-export all entities and enums
pub use language::LanguageCode;
pub use menu_category::{MenuCategory, MenuCategoryPatch, NewMenuCategory};
pub use menu_item::{MenuItem, MenuItemPatch, NewMenuItem};
pub use position::{CategoryScope, ItemScope, Positioned, RepositionRequest, ScopeKey, ShiftPlan};
pub use status::StatusResponse;
