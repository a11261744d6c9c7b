// ============================================================================
// Menu Infrastructure - Store Wiring
// File: crates/menu-infrastructure/src/stores.rs
// ============================================================================
//! Picks the adapters for the configured storage backend.

use std::sync::Arc;

use sqlx::PgPool;

use menu_core::domain::{MenuCategory, MenuItem};
use menu_core::repositories::{MenuCategoryRepository, MenuItemRepository, PositionStore};
use menu_core::services::{MenuCategoryService, MenuItemService, ReorderEngine};
use menu_shared::config::OrderingSettings;

use crate::database::{PgMenuCategoryRepository, PgMenuItemRepository, PgPositionStore};
use crate::memory::{MemoryMenuCategoryRepository, MemoryMenuItemRepository, MemoryMenuStore};

#[derive(Clone)]
pub struct MenuStores {
    pub categories: Arc<dyn MenuCategoryRepository>,
    pub items: Arc<dyn MenuItemRepository>,
    pub category_positions: Arc<dyn PositionStore<MenuCategory>>,
    pub item_positions: Arc<dyn PositionStore<MenuItem>>,
}

impl MenuStores {
    pub fn postgres(pool: PgPool, ordering: &OrderingSettings) -> Self {
        Self {
            categories: Arc::new(PgMenuCategoryRepository::new(pool.clone())),
            items: Arc::new(PgMenuItemRepository::new(pool.clone())),
            category_positions: Arc::new(PgPositionStore::<MenuCategory>::new(
                pool.clone(),
                ordering.lock_timeout(),
            )),
            item_positions: Arc::new(PgPositionStore::<MenuItem>::new(pool, ordering.lock_timeout())),
        }
    }

    pub fn memory(store: MemoryMenuStore) -> Self {
        Self {
            categories: Arc::new(MemoryMenuCategoryRepository::new(store.clone())),
            items: Arc::new(MemoryMenuItemRepository::new(store.clone())),
            category_positions: Arc::new(store.categories.clone()),
            item_positions: Arc::new(store.items),
        }
    }

    pub fn category_service(&self, ordering: &OrderingSettings) -> MenuCategoryService {
        MenuCategoryService::new(
            self.categories.clone(),
            ReorderEngine::new(self.category_positions.clone(), ordering),
        )
    }

    pub fn item_service(&self, ordering: &OrderingSettings) -> MenuItemService {
        MenuItemService::new(
            self.items.clone(),
            ReorderEngine::new(self.item_positions.clone(), ordering),
        )
    }
}
