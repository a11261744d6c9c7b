// ============================================================================
// Menu Infrastructure - In-Memory Repositories
// File: crates/menu-infrastructure/src/memory/repositories.rs
// ============================================================================

use std::cmp::Ordering;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use menu_core::domain::{LanguageCode, MenuCategory, MenuCategoryPatch, MenuItem, MenuItemPatch};
use menu_core::error::DomainError;
use menu_core::repositories::{MenuCategoryRepository, MenuItemRepository};

use super::table::MemoryTable;

/// Both tables of one in-memory menu. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryMenuStore {
    pub categories: MemoryTable<MenuCategory>,
    pub items: MemoryTable<MenuItem>,
}

impl MemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn items_of(&self, category_id: &Uuid, include_hidden: bool) -> Vec<MenuItem> {
        let mut items = self
            .items
            .select(|item| item.category_id == *category_id && (include_hidden || !item.hidden));
        items.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(a.language.cmp(&b.language))
                .then(a.created_at.cmp(&b.created_at))
        });
        items
    }

    fn with_items(&self, mut category: MenuCategory, include_hidden: bool) -> MenuCategory {
        category.menu_items = self.items_of(&category.id, include_hidden);
        category
    }
}

fn by_position(a: &MenuCategory, b: &MenuCategory) -> Ordering {
    a.position
        .cmp(&b.position)
        .then(a.created_at.cmp(&b.created_at))
}

pub struct MemoryMenuCategoryRepository {
    store: MemoryMenuStore,
}

impl MemoryMenuCategoryRepository {
    pub fn new(store: MemoryMenuStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MenuCategoryRepository for MemoryMenuCategoryRepository {
    async fn find_by_language(
        &self,
        language: LanguageCode,
        include_hidden: bool,
    ) -> Result<Vec<MenuCategory>, DomainError> {
        let mut categories = self
            .store
            .categories
            .select(|c| c.language == language && (include_hidden || !c.hidden));
        categories.sort_by(by_position);

        Ok(categories
            .into_iter()
            .map(|c| self.store.with_items(c, include_hidden))
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<MenuCategory>, DomainError> {
        let mut categories = self.store.categories.select(|_| true);
        categories.sort_by(|a, b| a.language.cmp(&b.language).then(by_position(a, b)));

        Ok(categories
            .into_iter()
            .map(|c| self.store.with_items(c, true))
            .collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuCategory>, DomainError> {
        Ok(self
            .store
            .categories
            .get(id)
            .map(|c| self.store.with_items(c, true)))
    }

    async fn create(&self, category: &MenuCategory) -> Result<MenuCategory, DomainError> {
        info!("Creating menu category: {}", category.title);

        let mut stored = category.clone();
        stored.menu_items = Vec::new();
        self.store.categories.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &MenuCategoryPatch,
    ) -> Result<Option<MenuCategory>, DomainError> {
        Ok(self
            .store
            .categories
            .modify(id, |category| category.apply(patch.clone()))
            .map(|category| self.store.with_items(category, true)))
    }

    async fn delete(&self, id: &Uuid) -> Result<u64, DomainError> {
        let items = &self.store.items;
        let removed = self
            .store
            .categories
            .remove_unless(id, |c| items.any(|item| item.category_id == c.id))
            .map_err(|c| {
                DomainError::Forbidden(format!("Menu category {} still has menu items", c.id))
            })?;

        Ok(removed.map_or(0, |_| 1))
    }
}

pub struct MemoryMenuItemRepository {
    store: MemoryMenuStore,
}

impl MemoryMenuItemRepository {
    pub fn new(store: MemoryMenuStore) -> Self {
        Self { store }
    }

    fn ensure_category(&self, category_id: &Uuid) -> Result<(), DomainError> {
        if self.store.categories.contains(category_id) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "Menu category {} does not exist",
                category_id
            )))
        }
    }
}

#[async_trait]
impl MenuItemRepository for MemoryMenuItemRepository {
    async fn find_by_category(
        &self,
        category_id: &Uuid,
        language: Option<LanguageCode>,
        include_hidden: bool,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let mut items = self.store.items.select(|item| {
            item.category_id == *category_id
                && language.map_or(true, |l| item.language == l)
                && (include_hidden || !item.hidden)
        });
        items.sort_by(|a, b| {
            a.language
                .cmp(&b.language)
                .then(a.position.cmp(&b.position))
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(items)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        Ok(self.store.items.get(id))
    }

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        self.ensure_category(&item.category_id)?;
        info!("Creating menu item: {} in category {}", item.title, item.category_id);

        self.store.items.insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn update(&self, id: &Uuid, patch: &MenuItemPatch) -> Result<Option<MenuItem>, DomainError> {
        if let Some(category_id) = &patch.category_id {
            self.ensure_category(category_id)?;
        }

        Ok(self.store.items.modify(id, |item| item.apply(patch.clone())))
    }

    async fn delete(&self, id: &Uuid) -> Result<u64, DomainError> {
        Ok(self.store.items.remove(id).map_or(0, |_| 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_core::domain::{NewMenuCategory, NewMenuItem};

    fn category(store: &MemoryMenuStore, language: LanguageCode, position: i32, hidden: bool) -> MenuCategory {
        let category = MenuCategory::new(NewMenuCategory {
            language,
            title: format!("{}-{}", language, position),
            description: None,
            image: None,
            hidden,
            position,
        });
        store.categories.insert(category.id, category.clone());
        category
    }

    #[tokio::test]
    async fn language_listing_filters_hidden_categories_and_items() {
        let store = MemoryMenuStore::new();
        let repo = MemoryMenuCategoryRepository::new(store.clone());

        let visible = category(&store, LanguageCode::En, 1, false);
        category(&store, LanguageCode::En, 0, true);
        category(&store, LanguageCode::Ua, 0, false);

        for (position, hidden) in [(1, false), (0, true)] {
            let item = MenuItem::new(NewMenuItem {
                language: LanguageCode::En,
                title: format!("item-{}", position),
                description: None,
                price: "1.00".to_string(),
                hidden,
                position,
                category_id: visible.id,
            });
            store.items.insert(item.id, item);
        }

        let listed = repo.find_by_language(LanguageCode::En, false).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, visible.id);
        assert_eq!(listed[0].menu_items.len(), 1);
        assert_eq!(listed[0].menu_items[0].position, 1);

        let with_hidden = repo.find_by_language(LanguageCode::En, true).await.unwrap();
        let positions: Vec<i32> = with_hidden.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1]);
        assert_eq!(with_hidden[1].menu_items.len(), 2);
    }

    #[tokio::test]
    async fn find_all_orders_by_language_then_position() {
        let store = MemoryMenuStore::new();
        let repo = MemoryMenuCategoryRepository::new(store.clone());
        category(&store, LanguageCode::Ua, 0, false);
        category(&store, LanguageCode::En, 1, true);
        category(&store, LanguageCode::En, 0, false);

        let all = repo.find_all().await.unwrap();
        let keys: Vec<(LanguageCode, i32)> = all.iter().map(|c| (c.language, c.position)).collect();
        assert_eq!(
            keys,
            vec![(LanguageCode::En, 0), (LanguageCode::En, 1), (LanguageCode::Ua, 0)]
        );
    }

    #[tokio::test]
    async fn category_with_items_cannot_be_deleted() {
        let store = MemoryMenuStore::new();
        let categories = MemoryMenuCategoryRepository::new(store.clone());
        let items = MemoryMenuItemRepository::new(store.clone());
        let soups = category(&store, LanguageCode::En, 0, false);

        let item = MenuItem::new(NewMenuItem {
            language: LanguageCode::En,
            title: "Borscht".to_string(),
            description: None,
            price: "4.20".to_string(),
            hidden: false,
            position: 0,
            category_id: soups.id,
        });
        items.create(&item).await.unwrap();

        let err = categories.delete(&soups.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        assert_eq!(items.delete(&item.id).await.unwrap(), 1);
        assert_eq!(categories.delete(&soups.id).await.unwrap(), 1);
        assert_eq!(categories.delete(&soups.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_merges_into_the_current_row() {
        let store = MemoryMenuStore::new();
        let repo = MemoryMenuCategoryRepository::new(store.clone());
        let soups = category(&store, LanguageCode::En, 0, false);

        // Position changed after the caller last read the row.
        store.categories.modify(&soups.id, |c| c.position = 3);

        let updated = repo
            .update(
                &soups.id,
                &MenuCategoryPatch {
                    title: Some("Broths".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Broths");
        assert_eq!(updated.position, 3);
        assert_eq!(store.categories.get(&soups.id).unwrap().position, 3);

        let missing = repo.update(&Uuid::new_v4(), &MenuCategoryPatch::default()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn item_cannot_move_to_missing_category() {
        let store = MemoryMenuStore::new();
        let items = MemoryMenuItemRepository::new(store.clone());
        let drinks = category(&store, LanguageCode::En, 0, false);
        let tea = MenuItem::new(NewMenuItem {
            language: LanguageCode::En,
            title: "Tea".to_string(),
            description: None,
            price: "1.20".to_string(),
            hidden: false,
            position: 0,
            category_id: drinks.id,
        });
        items.create(&tea).await.unwrap();

        let err = items
            .update(
                &tea.id,
                &MenuItemPatch {
                    category_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(store.items.get(&tea.id).unwrap().category_id, drinks.id);
    }

    #[tokio::test]
    async fn item_requires_existing_category() {
        let items = MemoryMenuItemRepository::new(MemoryMenuStore::new());
        let orphan = MenuItem::new(NewMenuItem {
            language: LanguageCode::Ua,
            title: "Вареники".to_string(),
            description: None,
            price: "3.00".to_string(),
            hidden: false,
            position: 0,
            category_id: Uuid::new_v4(),
        });

        let err = items.create(&orphan).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
}
