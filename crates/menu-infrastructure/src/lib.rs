//! # Menu Infrastructure
//! 
//! PostgreSQL and in-memory implementations of the menu ports (adapters).

pub mod database;
pub mod memory;
pub mod stores;

pub use database::{create_pool, run_migrations, PgMenuCategoryRepository, PgMenuItemRepository, PgPositionStore};
pub use memory::MemoryMenuStore;
pub use stores::MenuStores;
