// ============================================================================
// Menu Infrastructure - PostgreSQL Menu Item Repository
// File: crates/menu-infrastructure/src/database/postgres/item_repo_impl.rs
// ============================================================================

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use menu_core::domain::{ItemScope, LanguageCode, MenuItem, MenuItemPatch, ShiftPlan};
use menu_core::error::DomainError;
use menu_core::repositories::MenuItemRepository;

use super::position_store_impl::PgPositioned;
use super::{db_error, parse_language};

pub struct PgMenuItemRepository {
    pool: PgPool,
}

impl PgMenuItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MenuItemRow {
    pub id: Uuid,
    pub language: String,
    pub title: String,
    pub description: Option<String>,
    pub price: String,
    pub hidden: bool,
    pub position: i32,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl TryFrom<MenuItemRow> for MenuItem {
    type Error = DomainError;

    fn try_from(row: MenuItemRow) -> Result<Self, Self::Error> {
        Ok(MenuItem {
            id: row.id,
            language: parse_language(&row.language)?,
            title: row.title,
            description: row.description,
            price: row.price,
            hidden: row.hidden,
            position: row.position,
            category_id: row.category_id,
            created_at: row.created_at,
            modified_at: row.modified_at,
        })
    }
}

/// Items of the given categories grouped by category, each group ordered by
/// position.
pub(crate) async fn fetch_items_for(
    pool: &PgPool,
    category_ids: &[Uuid],
    include_hidden: bool,
) -> Result<HashMap<Uuid, Vec<MenuItem>>, DomainError> {
    let rows: Vec<MenuItemRow> = sqlx::query_as(
        r#"
        SELECT
            id, language, title, description, price,
            hidden, position, category_id, created_at, modified_at
        FROM menu_items
        WHERE category_id = ANY($1) AND ($2 OR hidden = FALSE)
        ORDER BY position ASC, language ASC, created_at ASC
        "#,
    )
    .bind(category_ids)
    .bind(include_hidden)
    .fetch_all(pool)
    .await
    .map_err(|e| db_error("loading menu items for categories", e))?;

    let mut grouped: HashMap<Uuid, Vec<MenuItem>> = HashMap::new();
    for row in rows {
        let item = MenuItem::try_from(row)?;
        grouped.entry(item.category_id).or_default().push(item);
    }
    Ok(grouped)
}

#[async_trait]
impl MenuItemRepository for PgMenuItemRepository {
    async fn find_by_category(
        &self,
        category_id: &Uuid,
        language: Option<LanguageCode>,
        include_hidden: bool,
    ) -> Result<Vec<MenuItem>, DomainError> {
        let rows: Vec<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, language, title, description, price,
                hidden, position, category_id, created_at, modified_at
            FROM menu_items
            WHERE category_id = $1
              AND ($2::TEXT IS NULL OR language = $2)
              AND ($3 OR hidden = FALSE)
            ORDER BY language ASC, position ASC, created_at ASC
            "#,
        )
        .bind(category_id)
        .bind(language.map(|l| l.as_str()))
        .bind(include_hidden)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing menu items by category", e))?;

        rows.into_iter().map(MenuItem::try_from).collect()
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, language, title, description, price,
                hidden, position, category_id, created_at, modified_at
            FROM menu_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding menu item by id", e))?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn create(&self, item: &MenuItem) -> Result<MenuItem, DomainError> {
        info!("Creating menu item: {} in category {}", item.title, item.category_id);

        let row: MenuItemRow = sqlx::query_as(
            r#"
            INSERT INTO menu_items (
                id, language, title, description, price,
                hidden, position, category_id, created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id, language, title, description, price,
                hidden, position, category_id, created_at, modified_at
            "#,
        )
        .bind(item.id)
        .bind(item.language.as_str())
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.price)
        .bind(item.hidden)
        .bind(item.position)
        .bind(item.category_id)
        .bind(item.created_at)
        .bind(item.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating menu item", e))?;

        MenuItem::try_from(row)
    }

    async fn update(&self, id: &Uuid, patch: &MenuItemPatch) -> Result<Option<MenuItem>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            UPDATE menu_items SET
                language = COALESCE($2, language),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                hidden = COALESCE($6, hidden),
                position = COALESCE($7, position),
                category_id = COALESCE($8, category_id),
                modified_at = NOW()
            WHERE id = $1
            RETURNING
                id, language, title, description, price,
                hidden, position, category_id, created_at, modified_at
            "#,
        )
        .bind(id)
        .bind(patch.language.map(|l| l.as_str()))
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.price.as_deref())
        .bind(patch.hidden)
        .bind(patch.position)
        .bind(patch.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating menu item", e))?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn delete(&self, id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting menu item", e))?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl PgPositioned for MenuItem {
    async fn fetch(conn: &mut PgConnection, id: &Uuid) -> Result<Option<Self>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            SELECT
                id, language, title, description, price,
                hidden, position, category_id, created_at, modified_at
            FROM menu_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("reading menu item for reposition", e))?;

        row.map(MenuItem::try_from).transpose()
    }

    async fn shift_siblings(
        conn: &mut PgConnection,
        scope: &ItemScope,
        exclude: &Uuid,
        shift: ShiftPlan,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE menu_items
            SET position = position + $1, modified_at = NOW()
            WHERE category_id = $2
              AND language = $3
              AND id <> $4
              AND position BETWEEN $5 AND $6
            "#,
        )
        .bind(shift.delta)
        .bind(scope.category_id)
        .bind(scope.language.as_str())
        .bind(exclude)
        .bind(shift.lower)
        .bind(shift.upper)
        .execute(&mut *conn)
        .await
        .map_err(|e| db_error("shifting menu items", e))?;

        Ok(result.rows_affected())
    }

    async fn write_position(
        conn: &mut PgConnection,
        id: &Uuid,
        position: i32,
    ) -> Result<Option<Self>, DomainError> {
        let row: Option<MenuItemRow> = sqlx::query_as(
            r#"
            UPDATE menu_items
            SET position = $2, modified_at = NOW()
            WHERE id = $1
            RETURNING
                id, language, title, description, price,
                hidden, position, category_id, created_at, modified_at
            "#,
        )
        .bind(id)
        .bind(position)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| db_error("writing menu item position", e))?;

        row.map(MenuItem::try_from).transpose()
    }
}
