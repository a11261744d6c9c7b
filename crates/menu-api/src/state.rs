use std::sync::Arc;

use menu_core::services::{MenuCategoryService, MenuItemService};
use menu_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<MenuCategoryService>,
    pub items: Arc<MenuItemService>,
    pub config: Arc<AppConfig>,
}
