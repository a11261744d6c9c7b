// ============================================================================
// Menu Core - Ordering Primitives
// File: crates/menu-core/src/domain/position.rs
// Description: Scope keys and the sibling shift computed for a move
// ============================================================================

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LanguageCode;

/// Partition inside which sibling positions must stay distinct.
pub trait ScopeKey: Clone + Debug + PartialEq + Eq + Send + Sync + 'static {
    /// Stable name for the scope, used by stores to serialise writers.
    fn lock_key(&self) -> String;
}

/// A record that carries a position within a scope.
pub trait Positioned: Clone + Debug + Send + Sync + 'static {
    type Scope: ScopeKey;

    /// Human readable entity name, used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
    fn position(&self) -> i32;
    fn scope(&self) -> Self::Scope;
}

/// Categories are ordered per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryScope {
    pub language: LanguageCode,
}

/// Items are ordered per category and language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemScope {
    pub category_id: Uuid,
    pub language: LanguageCode,
}

impl ScopeKey for CategoryScope {
    fn lock_key(&self) -> String {
        format!("menu_category:{}", self.language)
    }
}

impl ScopeKey for ItemScope {
    fn lock_key(&self) -> String {
        format!("menu_item:{}:{}", self.category_id, self.language)
    }
}

/// Move one record from `old_position` to `new_position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositionRequest {
    pub id: Uuid,
    pub old_position: i32,
    pub new_position: i32,
}

/// Siblings whose position lies in `lower..=upper` move by `delta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPlan {
    pub lower: i32,
    pub upper: i32,
    pub delta: i32,
}

impl ShiftPlan {
    /// `None` when the record stays where it is.
    pub fn for_move(old_position: i32, new_position: i32) -> Option<Self> {
        use std::cmp::Ordering;

        match old_position.cmp(&new_position) {
            Ordering::Equal => None,
            // Moving later: the records in between close the gap.
            Ordering::Less => Some(ShiftPlan {
                lower: old_position,
                upper: new_position,
                delta: -1,
            }),
            // Moving earlier: the records in between make room.
            Ordering::Greater => Some(ShiftPlan {
                lower: new_position,
                upper: old_position,
                delta: 1,
            }),
        }
    }

    pub fn contains(&self, position: i32) -> bool {
        position >= self.lower && position <= self.upper
    }

    /// New position for a sibling at `position`. `None` when the shift would
    /// leave the `i32` range.
    pub fn apply(&self, position: i32) -> Option<i32> {
        if self.contains(position) {
            position.checked_add(self.delta)
        } else {
            Some(position)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_later_shifts_down() {
        let plan = ShiftPlan::for_move(1, 3).unwrap();
        assert_eq!(plan, ShiftPlan { lower: 1, upper: 3, delta: -1 });
        assert_eq!(plan.apply(2), Some(1));
        assert_eq!(plan.apply(3), Some(2));
        assert_eq!(plan.apply(0), Some(0));
        assert_eq!(plan.apply(4), Some(4));
    }

    #[test]
    fn moving_earlier_shifts_up() {
        let plan = ShiftPlan::for_move(3, 0).unwrap();
        assert_eq!(plan, ShiftPlan { lower: 0, upper: 3, delta: 1 });
        assert_eq!(plan.apply(0), Some(1));
        assert_eq!(plan.apply(2), Some(3));
        assert_eq!(plan.apply(5), Some(5));
    }

    #[test]
    fn shifting_past_the_i32_range_is_refused() {
        let up = ShiftPlan::for_move(i32::MAX, 0).unwrap();
        assert_eq!(up.apply(i32::MAX), None);
        assert_eq!(up.apply(i32::MAX - 1), Some(i32::MAX));

        let down = ShiftPlan::for_move(i32::MIN, 0).unwrap();
        assert_eq!(down.apply(i32::MIN), None);
        assert_eq!(down.apply(-1), Some(-2));
    }

    #[test]
    fn staying_put_has_no_plan() {
        assert_eq!(ShiftPlan::for_move(2, 2), None);
    }

    #[test]
    fn lock_keys_separate_scopes() {
        let en = CategoryScope { language: LanguageCode::En };
        let ua = CategoryScope { language: LanguageCode::Ua };
        assert_ne!(en.lock_key(), ua.lock_key());

        let category_id = Uuid::new_v4();
        let item = ItemScope { category_id, language: LanguageCode::En };
        assert_eq!(item.lock_key(), format!("menu_item:{}:en", category_id));
    }
}
