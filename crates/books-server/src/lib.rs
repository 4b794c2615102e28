//! Books Server Library
//!
//! HTTP service for managing a catalogue of books, with bulk import from CSV.
//!
//! # Overview
//!
//! - **API Endpoints**: CRUD for books under `/api/books`
//! - **CSV Import**: `POST /api/books/import` parses, validates and persists
//!   rows one at a time, reporting per-row failures
//! - **Storage**: PostgreSQL through SQLx, or an in-memory store for
//!   development and tests
//! - **Configuration**: Environment-based configuration management
//! - **Middleware**: CORS, request tracing, compression and body limits
//!
//! # Architecture
//!
//! Features are vertical slices split into commands (create, update, delete,
//! import) and queries (get, list). Handlers receive the shared
//! [`store::SharedBookStore`] and never talk to the database directly.
//!
//! # Example
//!
//! ```no_run
//! use books_server::{api, config::Config, store};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = store::connect(&config).await?;
//!     api::serve(&config, store).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod models;
pub mod store;

pub use models::{Book, BookPatch, NewBook};
pub use store::{BookStore, SharedBookStore, StoreError};
