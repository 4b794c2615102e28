pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateBookCommand, CreateBookError, DeleteBookCommand, DeleteBookError, ImportBooksCommand,
    ImportBooksError, ImportBooksResponse, UpdateBookCommand, UpdateBookError,
};

pub use queries::{GetBookError, GetBookQuery, ListBooksError, ListBooksQuery};

pub use routes::books_routes;
