// ============================================================================
// Menu Core - Menu Category Service
// File: crates/menu-core/src/services/menu_category_service.rs
// ============================================================================
//! Category lifecycle and reordering

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    LanguageCode, MenuCategory, MenuCategoryPatch, NewMenuCategory, RepositionRequest,
    StatusResponse,
};
use crate::error::DomainError;
use crate::repositories::MenuCategoryRepository;
use crate::services::ReorderEngine;

pub struct MenuCategoryService {
    repo: Arc<dyn MenuCategoryRepository>,
    positions: ReorderEngine<MenuCategory>,
}

impl MenuCategoryService {
    pub fn new(repo: Arc<dyn MenuCategoryRepository>, positions: ReorderEngine<MenuCategory>) -> Self {
        Self { repo, positions }
    }

    /// Categories of one language, ordered by position, items embedded.
    pub async fn find_by_language(
        &self,
        language: LanguageCode,
        include_hidden: bool,
    ) -> Result<Vec<MenuCategory>, DomainError> {
        let categories = self.repo.find_by_language(language, include_hidden).await?;
        debug!(
            "Found {} {} categories (include_hidden={})",
            categories.len(),
            language,
            include_hidden
        );
        Ok(categories)
    }

    pub async fn find_all(&self) -> Result<Vec<MenuCategory>, DomainError> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<MenuCategory, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Menu category", *id))
    }

    /// Stores the category at the position the caller chose. Siblings are
    /// left alone.
    pub async fn create(&self, input: NewMenuCategory) -> Result<MenuCategory, DomainError> {
        let category = MenuCategory::new(input);
        let created = self.repo.create(&category).await?;
        info!(
            "Menu category created: {} ({} at {})",
            created.id, created.language, created.position
        );
        Ok(created)
    }

    /// Overwrites the supplied fields only. A new position is written as
    /// given, without renumbering siblings.
    pub async fn update(
        &self,
        id: &Uuid,
        patch: MenuCategoryPatch,
    ) -> Result<MenuCategory, DomainError> {
        let patch = patch.normalized();
        if patch.touches_position() {
            debug!("Menu category {} update sets position or language directly", id);
        }

        let updated = self
            .repo
            .update(id, &patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Menu category", *id))?;
        info!("Menu category updated: {}", id);
        Ok(updated)
    }

    pub async fn change_position(
        &self,
        request: RepositionRequest,
    ) -> Result<MenuCategory, DomainError> {
        self.positions.reposition(request).await
    }

    /// Leaves a gap in the language's positions.
    pub async fn delete(&self, id: &Uuid) -> Result<StatusResponse, DomainError> {
        let removed = self.repo.delete(id).await?;
        if removed == 0 {
            warn!("Delete of unknown menu category {}", id);
            return Err(DomainError::not_found("Menu category", *id));
        }

        info!("Menu category deleted: {}", id);
        Ok(StatusResponse::ok(format!(
            "Menu category {} successfully deleted",
            id
        )))
    }
}
