//! Books Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the books workspace.
//!
//! # Example
//!
//! ```no_run
//! use books_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> books_common::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("Application started");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

pub use error::{BooksError, Result};
