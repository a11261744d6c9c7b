//! In-memory adapters, used by tests and the `memory` storage backend

pub mod repositories;
pub mod table;

pub use repositories::{MemoryMenuCategoryRepository, MemoryMenuItemRepository, MemoryMenuStore};
pub use table::{MemoryTable, Placeable};
