pub mod create;
pub mod delete;
pub mod import;
pub mod update;

pub use create::{CreateBookCommand, CreateBookError};
pub use delete::{DeleteBookCommand, DeleteBookError};
pub use import::{ImportBooksCommand, ImportBooksError, ImportBooksResponse};
pub use update::{UpdateBookCommand, UpdateBookError};
