//! Feature modules implementing the books API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes:
//! - `commands/` - Write operations (create, update, delete, import)
//! - `queries/` - Read operations (get, list)
//! - `routes.rs` - HTTP route definitions
//!
//! Handlers are plain async functions taking the shared store and a command
//! or query value; routes call them directly.

pub mod books;
pub mod shared;

use axum::Router;

use crate::store::SharedBookStore;

/// Creates the API router with all feature routes mounted
///
/// - `/books` - Book CRUD and CSV import
pub fn router() -> Router<SharedBookStore> {
    Router::new().nest("/books", books::books_routes())
}
