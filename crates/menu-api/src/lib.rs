//! # Menu API
//! 
//! HTTP handlers, DTOs, error mapping and the route table.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
