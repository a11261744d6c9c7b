// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Category Repository
// File: crates/menu-infrastructure/src/database/postgres/category_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use menu_core::domain::{
    CategoryScope, LanguageCode, MenuCategory, MenuCategoryPatch, MenuItem, ShiftPlan,
};
use menu_core::error::DomainError;
use menu_core::repositories::MenuCategoryRepository;

use super::item_repo_impl::fetch_items_for;
use super::position_store_impl::PgPositioned;
use super::{db_error, parse_language};

pub struct PgMenuCategoryRepository {
    pool: PgPool,
}

impl PgMenuCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Embeds each category's items, ordered by position.
    async fn with_items(
        &self,
        mut categories: Vec<MenuCategory>,
        include_hidden: bool,
    ) -> Result<Vec<MenuCategory>, DomainError> {
        if categories.is_empty() {
            return Ok(categories);
        }

        let ids: Vec<Uuid> = categories.iter().map(|c| c.id).collect();
        let mut items: HashMap<Uuid, Vec<MenuItem>> =
            fetch_items_for(&self.pool, &ids, include_hidden).await?;

        for category in categories.iter_mut() {
            category.menu_items = items.remove(&category.id).unwrap_or_default();
        }
        Ok(categories)
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct MenuCategoryRow {
    pub id: Uuid,
    pub language: String,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub hidden: bool,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl TryFrom<MenuCategoryRow> for MenuCategory {
    type Error = DomainError;

    fn try_from(row: MenuCategoryRow) -> Result<Self, Self::Error> {
        Ok(MenuCategory {
            id: row.id,
            language: parse_language(&row.language)?,
            title: row.title,
            description: row.description,
            image: row.image,
            hidden: row.hidden,
            position: row.position,
            menu_items: Vec::new(),
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

fn into_categories(rows: Vec<MenuCategoryRow>) -> Result<Vec<MenuCategory>, DomainError> {
    rows.into_iter().map(MenuCategory::try_from).collect()
}

#[async_trait]
impl MenuCategoryRepository for PgMenuCategoryRepository {
    async fn find_by_language(
        &self,
        language: LanguageCode,
        include_hidden: bool,
    ) -> Result<Vec<MenuCategory>, DomainError> {
        let rows: Vec<MenuCategoryRow> = sqlx::query_as(
            r#"
            SELECT
                id, language, title, description, image,
                hidden, position, created_at, modified_at
            FROM menu_categories
            WHERE language = $1 AND ($2 OR hidden = FALSE)
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(language.as_str())
        .bind(include_hidden)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing menu categories by language", e))?;

        debug!("Loaded {} {} categories", rows.len(), language);
        self.with_items(into_categories(rows)?, include_hidden).await
    }

    async fn find_all(&self) -> Result<Vec<MenuCategory>, DomainError> {
        let rows: Vec<MenuCategoryRow> = sqlx::query_as(
            r#"
            SELECT
                id, language, title, description, image,
                hidden, position, created_at, modified_at
            FROM menu_categories
            ORDER BY language ASC, position ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing all menu categories", e))?;

        self.with_items(into_categories(rows)?, true).await
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuCategory>, DomainError> {
        let row: Option<MenuCategoryRow> = sqlx::query_as(
            r#"
            SELECT
                id, language, title, description, image,
                hidden, position, created_at, modified_at
            FROM menu_categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding menu category by id", e))?;

        match row {
            Some(row) => {
                let category = MenuCategory::try_from(row)?;
                Ok(self.with_items(vec![category], true).await?.pop())
            }
            None => Ok(None),
        }
    }

    async fn create(&self, category: &MenuCategory) -> Result<MenuCategory, DomainError> {
        info!("Creating menu category: {}", category.title);

        let row: MenuCategoryRow = sqlx::query_as(
            r#"
            INSERT INTO menu_categories (
                id, language, title, description, image,
                hidden, position, created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING
                id, language, title, description, image,
                hidden, position, created_at, modified_at
            "#,
        )
        .bind(category.id)
        .bind(category.language.as_str())
        .bind(&category.title)
        .bind(&category.description)
        .bind(&category.image)
        .bind(category.hidden)
        .bind(category.position)
        .bind(category.created_at)
        .bind(category.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating menu category", e))?;

        MenuCategory::try_from(row)
    }

    async fn update(
        &self,
        id: &Uuid,
        patch: &MenuCategoryPatch,
    ) -> Result<Option<MenuCategory>, DomainError> {
        // Unset fields keep the current column value, so a concurrent
        // reposition is never overwritten by a stale position.
        let row: Option<MenuCategoryRow> = sqlx::query_as(
            r#"
            UPDATE menu_categories SET
                language = COALESCE($2, language),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                image = COALESCE($5, image),
                hidden = COALESCE($6, hidden),
                position = COALESCE($7, position),
                modified_at = NOW()
            WHERE id = $1
            RETURNING
                id, language, title, description, image,
                hidden, position, created_at, modified_at
            "#,
        )
        .bind(id)
        .bind(patch.language.map(|l| l.as_str()))
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.image.as_deref())
        .bind(patch.hidden)
        .bind(patch.position)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating menu category", e))?;

        match row {
            Some(row) => {
                let category = MenuCategory::try_from(row)?;
                Ok(self.with_items(vec![category], true).await?.pop())
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM menu_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting menu category", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl PgPositioned for MenuCategory {
    async fn fetch(conn: &mut PgConnection, id: &Uuid) -> Result<Option<Self>, DomainError> {
        let row: Option<MenuCategoryRow> = sqlx::query_as(
            r#"
            SELECT
                id, language, title, description, image,
                hidden, position, created_at, modified_at
            FROM menu_categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("reading menu category for reposition", e))?;

        row.map(MenuCategory::try_from).transpose()
    }

    async fn shift_siblings(
        conn: &mut PgConnection,
        scope: &CategoryScope,
        exclude: &Uuid,
        shift: ShiftPlan,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE menu_categories
            SET position = position + $1, modified_at = NOW()
            WHERE language = $2
              AND id <> $3
              AND position BETWEEN $4 AND $5
            "#,
        )
        .bind(shift.delta)
        .bind(scope.language.as_str())
        .bind(exclude)
        .bind(shift.lower)
        .bind(shift.upper)
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("shifting menu categories", e))?;

        Ok(result.rows_affected())
    }

    async fn write_position(
        conn: &mut PgConnection,
        id: &Uuid,
        position: i32,
    ) -> Result<Option<Self>, DomainError> {
        let row: Option<MenuCategoryRow> = sqlx::query_as(
            r#"
            UPDATE menu_categories
            SET position = $2, modified_at = NOW()
            WHERE id = $1
            RETURNING
                id, language, title, description, image,
                hidden, position, created_at, modified_at
            "#,
        )
        .bind(id)
        .bind(position)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("writing menu category position", e))?;

        row.map(MenuCategory::try_from).transpose()
    }
}
