//! Menu item repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{LanguageCode, MenuItem, MenuItemPatch};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    /// Items of a category ordered by language then position. Passing a
    /// language narrows the result to a single ordering scope.
    async fn find_by_category(
        &self,
        category_id: &Uuid,
        language: Option<LanguageCode>,
        include_hidden: bool,
    ) -> Result<Vec<MenuItem>, DomainError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError>;

    /// Fails with `Forbidden` when the referenced category does not exist.
    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError>;

    /// Writes only the fields set in `patch`. Fails with `Forbidden` when a
    /// new `category_id` does not exist.
    async fn update(&self, id: &Uuid, patch: &MenuItemPatch) -> Result<Option<MenuItem>, DomainError>;

    async fn delete(&self, id: &Uuid) -> Result<u64, DomainError>;
}
