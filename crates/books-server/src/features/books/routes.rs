//! Book API routes
//!
//! # Route Structure
//!
//! - `GET /api/books` - List all books
//! - `GET /api/books/:id` - Get a single book
//! - `POST /api/books` - Create a book
//! - `PUT /api/books/:id` - Update some fields of a book
//! - `DELETE /api/books/:id` - Delete a book
//! - `POST /api/books/import` - Bulk import from a multipart CSV upload (field `file`)
//!
//! Failures answer with a fixed `{ "error": ... }` body; the cause is logged
//! and never echoed to the client.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::{
    commands::{
        CreateBookCommand, CreateBookError, DeleteBookCommand, DeleteBookError,
        ImportBooksCommand, ImportBooksError, UpdateBookCommand, UpdateBookError,
    },
    queries::{GetBookError, GetBookQuery, ListBooksError, ListBooksQuery},
};
use crate::api::response::{ErrorResponse, MessageResponse};
use crate::ingest::csv::validator::BookInput;
use crate::store::SharedBookStore;

/// Multipart field holding the CSV upload
pub const UPLOAD_FIELD: &str = "file";

// ============================================================================
// Router Configuration
// ============================================================================

/// Creates the books router
///
/// # Examples
///
/// ```rust,ignore
/// use axum::Router;
/// use books_server::features::books::routes::books_routes;
///
/// let app = Router::new()
///     .nest("/api/books", books_routes())
///     .with_state(store);
/// ```
pub fn books_routes() -> Router<SharedBookStore> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/import", post(import_books))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Create a new book
///
/// # Request Body
///
/// ```json
/// { "title": "Dune", "author": "Frank Herbert", "publishedYear": 1965 }
/// ```
///
/// # Response
///
/// - `201 Created` - The stored book, including its new `id`
/// - `400 Bad Request` - Invalid body or store failure
#[tracing::instrument(skip(store, payload))]
async fn create_book(
    State(store): State<SharedBookStore>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<Response, BooksApiError> {
    let Json(book) = payload.map_err(|e| CreateBookError::InvalidBody(e.body_text()))?;

    let book = super::commands::create::handle(store, CreateBookCommand { book }).await?;

    Ok((StatusCode::CREATED, Json(book)).into_response())
}

/// Update an existing book
///
/// Any non-empty subset of `title`, `author` and `publishedYear` may be sent.
///
/// # Response
///
/// - `200 OK` - The updated book
/// - `400 Bad Request` - Invalid id or body, unknown book, or store failure
#[tracing::instrument(skip(store, payload), fields(book_id = %id))]
async fn update_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<Response, BooksApiError> {
    let Json(changes) = payload.map_err(|e| UpdateBookError::InvalidBody(e.body_text()))?;

    let book = super::commands::update::handle(store, UpdateBookCommand { id, changes }).await?;

    Ok((StatusCode::OK, Json(book)).into_response())
}

/// Delete a book
///
/// # Response
///
/// - `200 OK` - `{ "message": "Book deleted successfully" }`
/// - `400 Bad Request` - Invalid id, unknown book, or store failure
#[tracing::instrument(skip(store), fields(book_id = %id))]
async fn delete_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
) -> Result<Response, BooksApiError> {
    super::commands::delete::handle(store, DeleteBookCommand { id }).await?;

    Ok((StatusCode::OK, Json(MessageResponse::new("Book deleted successfully"))).into_response())
}

/// Import books from an uploaded CSV file
///
/// # Response
///
/// - `200 OK` - `{ "message", "imported", "failed", "errors" }`, also when
///   some rows failed
/// - `400 Bad Request` - No `file` field in the upload
/// - `413 Payload Too Large` - Upload exceeds the configured limit
/// - `500 Internal Server Error` - The upload could not be read
#[tracing::instrument(skip(store, multipart))]
async fn import_books(
    State(store): State<SharedBookStore>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, BooksApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Request is not a multipart upload");
        ImportBooksError::NoFile
    })?;

    let command = ImportBooksCommand {
        file: read_upload(&mut multipart).await?,
    };

    let response = super::commands::import::handle(store, command).await?;

    tracing::info!(
        imported = response.imported,
        failed = response.failed,
        "Books imported via API"
    );

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// Contents of the first `file` field; other fields are skipped
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, ImportBooksError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field.bytes().await.map_err(upload_error)?;
            return Ok(Some(bytes.to_vec()));
        }
    }
    Ok(None)
}

fn upload_error(err: MultipartError) -> ImportBooksError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ImportBooksError::TooLarge
    } else {
        ImportBooksError::Upload(err.body_text())
    }
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// List all books
///
/// # Response
///
/// - `200 OK` - JSON array of books
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(store))]
async fn list_books(State(store): State<SharedBookStore>) -> Result<Response, BooksApiError> {
    let books = super::queries::list::handle(store, ListBooksQuery).await?;

    Ok((StatusCode::OK, Json(books)).into_response())
}

/// Get a single book
///
/// # Response
///
/// - `200 OK` - The book
/// - `404 Not Found` - Unknown or malformed id
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(store), fields(book_id = %id))]
async fn get_book(
    State(store): State<SharedBookStore>,
    Path(id): Path<String>,
) -> Result<Response, BooksApiError> {
    let book = super::queries::get::handle(store, GetBookQuery { id }).await?;

    Ok((StatusCode::OK, Json(book)).into_response())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for book API endpoints
#[derive(Debug)]
enum BooksApiError {
    Create(CreateBookError),
    Update(UpdateBookError),
    Delete(DeleteBookError),
    Import(ImportBooksError),
    Get(GetBookError),
    List(ListBooksError),
}

impl From<CreateBookError> for BooksApiError {
    fn from(err: CreateBookError) -> Self {
        Self::Create(err)
    }
}

impl From<UpdateBookError> for BooksApiError {
    fn from(err: UpdateBookError) -> Self {
        Self::Update(err)
    }
}

impl From<DeleteBookError> for BooksApiError {
    fn from(err: DeleteBookError) -> Self {
        Self::Delete(err)
    }
}

impl From<ImportBooksError> for BooksApiError {
    fn from(err: ImportBooksError) -> Self {
        Self::Import(err)
    }
}

impl From<GetBookError> for BooksApiError {
    fn from(err: GetBookError) -> Self {
        Self::Get(err)
    }
}

impl From<ListBooksError> for BooksApiError {
    fn from(err: ListBooksError) -> Self {
        Self::List(err)
    }
}

impl IntoResponse for BooksApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            BooksApiError::Create(err) => {
                log_failure(err);
                (StatusCode::BAD_REQUEST, "Failed to create book")
            },
            BooksApiError::Update(err) => {
                log_failure(err);
                (StatusCode::BAD_REQUEST, "Failed to update book")
            },
            BooksApiError::Delete(err) => {
                log_failure(err);
                (StatusCode::BAD_REQUEST, "Failed to delete book")
            },
            BooksApiError::Import(ImportBooksError::NoFile) => {
                (StatusCode::BAD_REQUEST, "No file uploaded")
            },
            BooksApiError::Import(ImportBooksError::TooLarge) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "File too large")
            },
            BooksApiError::Import(err @ ImportBooksError::Upload(_)) => {
                tracing::error!(error = %err, "Import failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Import failed")
            },
            BooksApiError::Get(GetBookError::NotFound) => (StatusCode::NOT_FOUND, "Book not found"),
            BooksApiError::Get(err @ GetBookError::Store(_)) => {
                tracing::error!(error = %err, "Failed to fetch book");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch book")
            },
            BooksApiError::List(err) => {
                tracing::error!(error = %err, "Failed to fetch books");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch books")
            },
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Client mistakes log at warn, store failures at error
fn log_failure(err: &(dyn std::error::Error + 'static)) {
    let is_store_failure = std::iter::successors(err.source(), |e| e.source())
        .any(|cause| cause.is::<sqlx::Error>());
    if is_store_failure {
        tracing::error!(error = %err, "Book request failed");
    } else {
        tracing::warn!(error = %err, "Book request rejected");
    }
}
