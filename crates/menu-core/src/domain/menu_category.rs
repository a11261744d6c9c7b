// ============================================================================
// Menu Core - Menu Category Entity
// File: crates/menu-core/src/domain/menu_category.rs
// Description: Top level menu entry, ordered per language
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::position::{CategoryScope, Positioned};
use super::{LanguageCode, MenuItem};

/// Menu Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    pub id: Uuid,
    pub language: LanguageCode,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub hidden: bool,
    pub position: i32,

    /// Resolved children, ordered by their own position.
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuCategory {
    pub language: LanguageCode,
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub hidden: bool,
    pub position: i32,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuCategoryPatch {
    pub language: Option<LanguageCode>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub hidden: Option<bool>,
    pub position: Option<i32>,
}

impl MenuCategoryPatch {
    /// Trims the supplied text fields.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            image: self.image.map(|i| i.trim().to_string()),
            ..self
        }
    }

    pub fn touches_position(&self) -> bool {
        self.position.is_some() || self.language.is_some()
    }
}

impl MenuCategory {
    pub fn new(input: NewMenuCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            language: input.language,
            title: input.title.trim().to_string(),
            description: input.description.map(|d| d.trim().to_string()),
            image: input.image.map(|i| i.trim().to_string()),
            hidden: input.hidden,
            position: input.position,
            menu_items: Vec::new(),
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    /// Applies `patch` to this record. Stores use it to merge a patch into
    /// the current row; only the supplied fields change.
    pub fn apply(&mut self, patch: MenuCategoryPatch) {
        let patch = patch.normalized();
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.image.is_some() {
            self.image = patch.image;
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        self.modified_at = Some(Utc::now());
    }

    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

impl Positioned for MenuCategory {
    type Scope = CategoryScope;

    const ENTITY: &'static str = "Menu category";

    fn id(&self) -> Uuid {
        self.id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn scope(&self) -> CategoryScope {
        CategoryScope {
            language: self.language,
        }
    }
}
