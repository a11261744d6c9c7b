//! # Menu Core
//! 
//! Domain entities, the position engine, services, and repository ports for
//! the menu service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, ErrorKind};
