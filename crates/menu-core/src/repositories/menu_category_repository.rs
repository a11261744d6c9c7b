//! Menu category repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{LanguageCode, MenuCategory, MenuCategoryPatch};
use crate::error::DomainError;

/// Persistence for categories. Listing and lookups resolve each category's
/// items, ordered by item position.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuCategoryRepository: Send + Sync {
    /// Categories of one language ordered by position.
    async fn find_by_language(
        &self,
        language: LanguageCode,
        include_hidden: bool,
    ) -> Result<Vec<MenuCategory>, DomainError>;

    /// Every category, ordered by language then position.
    async fn find_all(&self) -> Result<Vec<MenuCategory>, DomainError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuCategory>, DomainError>;

    async fn create(&self, category: &MenuCategory) -> Result<MenuCategory, DomainError>;

    /// Writes only the fields set in `patch`, merged into the current row.
    /// `None` when no row with `id` exists.
    async fn update(
        &self,
        id: &Uuid,
        patch: &MenuCategoryPatch,
    ) -> Result<Option<MenuCategory>, DomainError>;

    /// Number of rows removed.
    async fn delete(&self, id: &Uuid) -> Result<u64, DomainError>;
}
