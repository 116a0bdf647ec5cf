//! Backend proxy: axum routes, handlers and wire DTOs.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AppState, MISSING_KEY_ERROR};
pub use routes::routes;
