// ============================================================================
// Menu Core - Menu Item Service
// File: crates/menu-core/src/services/menu_item_service.rs
// ============================================================================

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    LanguageCode, MenuItem, MenuItemPatch, NewMenuItem, RepositionRequest, StatusResponse,
};
use crate::error::DomainError;
use crate::repositories::MenuItemRepository;
use crate::services::ReorderEngine;

pub struct MenuItemService {
    repo: Arc<dyn MenuItemRepository>,
    positions: ReorderEngine<MenuItem>,
}

impl MenuItemService {
    pub fn new(repo: Arc<dyn MenuItemRepository>, positions: ReorderEngine<MenuItem>) -> Self {
        Self { repo, positions }
    }

    pub async fn find_by_category(
        &self,
        category_id: &Uuid,
        language: Option<LanguageCode>,
        include_hidden: bool,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let items = self
            .repo
            .find_by_category(category_id, language, include_hidden)
            .await?;
        debug!("Found {} items in category {}", items.len(), category_id);
        Ok(items)
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<MenuItem, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Menu item", *id))
    }

    pub async fn create(&self, input: NewMenuItem) -> Result<MenuItem, DomainError> {
        let item = MenuItem::new(input);
        let created = self.repo.create(&item).await?;
        info!(
            "Menu item created: {} in category {} ({} at {})",
            created.id, created.category_id, created.language, created.position
        );
        Ok(created)
    }

    /// Overwrites the supplied fields only.
    pub async fn update(&self, id: &Uuid, patch: MenuItemPatch) -> Result<MenuItem, DomainError> {
        let patch = patch.normalized();
        if patch.touches_position() {
            debug!("Menu item {} update sets position, language or category directly", id);
        }

        let updated = self
            .repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Menu item", *id))?;
        info!("Menu item updated: {}", id);
        Ok(updated)
    }

    pub async fn change_position(&self, request: RepositionRequest) -> Result<MenuItem, DomainError> {
        self.positions.reposition(request).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<StatusResponse, DomainError> {
        let removed = self.repo.delete(id).await?;
        if removed == 0 {
            warn!("Delete of unknown menu item {}", id);
            return Err(DomainError::not_found("Menu item", *id));
        }

        info!("Menu item deleted: {}", id);
        Ok(StatusResponse::ok(format!("Menu item {} successfully deleted", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repositories::{MockMenuItemRepository, PositionStore, PositionTransaction};
    use async_trait::async_trait;
    use menu_shared::config::OrderingSettings;
    use mockall::predicate::*;

    struct ClosedStore;

    #[async_trait]
    impl PositionStore<MenuItem> for ClosedStore {
        async fn begin(&self) -> Result<Box<dyn PositionTransaction<MenuItem>>, DomainError> {
            Err(DomainError::InternalError("not used".into()))
        }
    }

    fn service(repo: MockMenuItemRepository) -> MenuItemService {
        MenuItemService::new(
            Arc::new(repo),
            ReorderEngine::new(Arc::new(ClosedStore), &OrderingSettings::default()),
        )
    }

    fn espresso(category_id: Uuid) -> NewMenuItem {
        NewMenuItem {
            language: LanguageCode::En,
            title: "Espresso".to_string(),
            description: None,
            price: "2.50".to_string(),
            hidden: false,
            position: 0,
            category_id,
        }
    }

    #[tokio::test]
    async fn create_in_missing_category_is_forbidden() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_create()
            .returning(|item| Err(DomainError::Forbidden(format!("category {} does not exist", item.category_id))));

        let err = service(repo)
            .create(espresso(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn find_by_category_passes_filters_through() {
        let category_id = Uuid::new_v4();
        let item = MenuItem::new(espresso(category_id));
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find_by_category()
            .with(eq(category_id), eq(Some(LanguageCode::En)), eq(false))
            .times(1)
            .returning(move |_, _, _| Ok(vec![item.clone()]));

        let items = service(repo)
            .find_by_category(&category_id, Some(LanguageCode::En), false)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category_id, category_id);
    }

    #[tokio::test]
    async fn find_missing_item_is_not_found() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repo).find_by_id(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Menu item", .. }));
    }

    #[tokio::test]
    async fn update_sends_only_the_patch() {
        let category_id = Uuid::new_v4();
        let item = MenuItem::new(espresso(category_id));
        let id = item.id;
        let mut repo = MockMenuItemRepository::new();
        repo.expect_find_by_id().never();
        repo.expect_update()
            .withf(move |target, patch| {
                *target == id && patch.price.as_deref() == Some("2.80") && patch.position.is_none()
            })
            .times(1)
            .returning(move |_, patch| {
                let mut updated = item.clone();
                updated.apply(patch.clone());
                Ok(Some(updated))
            });

        let updated = service(repo)
            .update(
                &id,
                MenuItemPatch {
                    price: Some("2.80 ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, "2.80");
        assert_eq!(updated.position, 0);
    }

    #[tokio::test]
    async fn update_of_missing_item_is_not_found() {
        let mut repo = MockMenuItemRepository::new();
        repo.expect_update().returning(|_, _| Ok(None));

        let err = service(repo)
            .update(&Uuid::new_v4(), MenuItemPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn delete_reports_status() {
        let id = Uuid::new_v4();
        let mut repo = MockMenuItemRepository::new();
        repo.expect_delete().with(eq(id)).returning(|_| Ok(1));

        let status = service(repo).delete(&id).await.unwrap();
        assert_eq!(status.message, format!("Menu item {} successfully deleted", id));
    }
}
