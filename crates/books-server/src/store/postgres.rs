//! PostgreSQL book store
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database.

use async_trait::async_trait;
use sqlx::{error::ErrorKind, PgPool};
use uuid::Uuid;

use super::{BookStore, StoreError, StoreResult};
use crate::models::{Book, BookPatch, NewBook};

const BOOK_COLUMNS: &str = "id, title, author, published_year, created_at, updated_at";

/// Book store backed by a sqlx PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map constraint violations to [`StoreError::Constraint`], keep the rest as-is
fn map_db_error(error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = error {
        match db_err.kind() {
            ErrorKind::CheckViolation
            | ErrorKind::UniqueViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::ForeignKeyViolation => {
                return StoreError::Constraint(db_err.message().to_string());
            },
            _ => {},
        }
    }
    StoreError::Database(error)
}

#[async_trait]
impl BookStore for PgBookStore {
    #[tracing::instrument(skip(self, book), fields(title = %book.title))]
    async fn create(&self, book: NewBook) -> StoreResult<Book> {
        let book = Book::create(book);
        let sql = format!(
            "INSERT INTO books ({BOOK_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {BOOK_COLUMNS}"
        );

        sqlx::query_as::<_, Book>(&sql)
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.published_year)
            .bind(book.created_at)
            .bind(book.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> StoreResult<Vec<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY created_at, id");

        sqlx::query_as::<_, Book>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Book> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");

        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .ok_or(StoreError::NotFound(id))
    }

    #[tracing::instrument(skip(self, patch))]
    async fn update(&self, id: Uuid, patch: BookPatch) -> StoreResult<Book> {
        let sql = format!(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                published_year = COALESCE($4, published_year),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOK_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.author)
            .bind(patch.published_year)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .ok_or(StoreError::NotFound(id))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::db::health_check(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
