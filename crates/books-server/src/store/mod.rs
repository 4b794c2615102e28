//! Record store adapter
//!
//! [`BookStore`] is the only persistence seam of the service. Routes and the
//! import pipeline receive a [`SharedBookStore`] built once at startup by
//! [`connect`] and never touch the backend directly.
//!
//! Backends:
//! - [`PgBookStore`]: PostgreSQL through a sqlx pool
//! - [`InMemoryBookStore`]: process-local map, for development and tests

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, StoreBackend};
use crate::db;
use crate::models::{Book, BookPatch, NewBook};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryBookStore;
pub use postgres::PgBookStore;

/// Errors surfaced by any store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// No book with the given identifier exists
    #[error("Book '{0}' not found")]
    NotFound(Uuid),

    /// The backend rejected the record (check, unique or not-null constraint)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Query or connection failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Create/read/update/delete/list for book records
///
/// Every call is a suspend point that may fail; callers never assume a call
/// succeeded without checking.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist a validated book and return it with its assigned identifier
    async fn create(&self, book: NewBook) -> StoreResult<Book>;

    /// All books, oldest first
    async fn find_all(&self) -> StoreResult<Vec<Book>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Book>;

    /// Apply a partial update and return the updated record
    async fn update(&self, id: Uuid, patch: BookPatch) -> StoreResult<Book>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Verify the backend is reachable
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    /// Release backend resources at shutdown
    async fn close(&self) {}
}

pub type SharedBookStore = Arc<dyn BookStore>;

/// Build the configured store backend
///
/// For PostgreSQL this creates the pool and applies pending migrations.
pub async fn connect(config: &Config) -> anyhow::Result<SharedBookStore> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory book store; data is lost on restart");
            Ok(Arc::new(InMemoryBookStore::new()))
        },
        StoreBackend::Postgres => {
            let pool = db::create_pool(&config.database).await?;
            db::run_migrations(&pool).await?;
            Ok(Arc::new(PgBookStore::new(pool)))
        },
    }
}
