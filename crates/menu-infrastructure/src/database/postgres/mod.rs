//! PostgreSQL repository implementations

pub mod category_repo_impl;
pub mod item_repo_impl;
pub mod position_store_impl;

pub use category_repo_impl::PgMenuCategoryRepository;
pub use item_repo_impl::PgMenuItemRepository;
pub use position_store_impl::{PgPositionStore, PgPositioned};

use tracing::error;

use menu_core::domain::LanguageCode;
use menu_core::error::DomainError;

const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Logs the driver error and reduces it to a domain error. Only `context`
/// reaches the caller; driver detail stays in the log.
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);

    let code = e
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned());

    classify(context, code.as_deref())
}

fn classify(context: &str, sqlstate: Option<&str>) -> DomainError {
    match sqlstate {
        Some(FOREIGN_KEY_VIOLATION) => {
            DomainError::Forbidden(format!("{}: referenced menu category is missing or in use", context))
        }
        Some(LOCK_NOT_AVAILABLE) => {
            DomainError::PositionConflict(format!("{}: scope lock not available", context))
        }
        Some(NUMERIC_VALUE_OUT_OF_RANGE) => {
            DomainError::PositionConflict(format!("{}: position out of range", context))
        }
        _ => DomainError::DatabaseError(context.to_string()),
    }
}

pub(crate) fn parse_language(value: &str) -> Result<LanguageCode, DomainError> {
    LanguageCode::from_str(value)
        .ok_or_else(|| DomainError::InternalError(format!("unknown language code in row: {}", value)))
}
