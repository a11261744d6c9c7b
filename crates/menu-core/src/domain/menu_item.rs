// ============================================================================
// Menu Core - Menu Item Entity
// File: crates/menu-core/src/domain/menu_item.rs
// Description: Priced entry inside a category, ordered per category and language
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::position::{ItemScope, Positioned};
use super::LanguageCode;

/// Menu Item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub language: LanguageCode,
    pub title: String,
    pub description: Option<String>,
    /// Decimal kept as text, exactly as entered.
    pub price: String,
    pub hidden: bool,
    pub position: i32,
    pub category_id: Uuid,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub language: LanguageCode,
    pub title: String,
    pub description: Option<String>,
    pub price: String,
    pub hidden: bool,
    pub position: i32,
    pub category_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItemPatch {
    pub language: Option<LanguageCode>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub hidden: Option<bool>,
    pub position: Option<i32>,
    pub category_id: Option<Uuid>,
}

impl MenuItemPatch {
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            price: self.price.map(|p| p.trim().to_string()),
            ..self
        }
    }

    /// Whether the patch moves the item within or out of its scope.
    pub fn touches_position(&self) -> bool {
        self.position.is_some() || self.language.is_some() || self.category_id.is_some()
    }
}

impl MenuItem {
    pub fn new(input: NewMenuItem) -> Self {
        Self {
            id: Uuid::new_v4(),
            language: input.language,
            title: input.title.trim().to_string(),
            description: input.description.map(|d| d.trim().to_string()),
            price: input.price.trim().to_string(),
            hidden: input.hidden,
            position: input.position,
            category_id: input.category_id,
            created_at: Utc::now(),
            modified_at: None,
        }
    }

    pub fn apply(&mut self, patch: MenuItemPatch) {
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
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        self.modified_at = Some(Utc::now());
    }
}

impl Positioned for MenuItem {
    type Scope = ItemScope;

    const ENTITY: &'static str = "Menu item";

    fn id(&self) -> Uuid {
        self.id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn scope(&self) -> ItemScope {
        ItemScope {
            category_id: self.category_id,
            language: self.language,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_includes_language() {
        let category_id = Uuid::new_v4();
        let new_item = |language| NewMenuItem {
            language,
            title: "Espresso".to_string(),
            description: None,
            price: "2.50".to_string(),
            hidden: false,
            position: 0,
            category_id,
        };

        let en = MenuItem::new(new_item(LanguageCode::En));
        let ua = MenuItem::new(new_item(LanguageCode::Ua));

        assert_ne!(en.scope(), ua.scope());
        assert_eq!(en.scope().category_id, ua.scope().category_id);
    }

    #[test]
    fn patch_can_move_item_to_another_category() {
        let mut item = MenuItem::new(NewMenuItem {
            language: LanguageCode::En,
            title: "Latte".to_string(),
            description: Some("milk".to_string()),
            price: " 3.10 ".to_string(),
            hidden: false,
            position: 4,
            category_id: Uuid::new_v4(),
        });
        assert_eq!(item.price, "3.10");

        let target = Uuid::new_v4();
        item.apply(MenuItemPatch {
            category_id: Some(target),
            ..Default::default()
        });

        assert_eq!(item.category_id, target);
        assert_eq!(item.position, 4);
    }
}
