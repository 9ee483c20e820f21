//! Books repository

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

/// Unique index backing the one-row-per-(title, author) rule.
const TITLE_AUTHOR_KEY: &str = "books_title_author_key";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ===== READ =====

    /// List the whole catalog in insertion order
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Check whether a (title, author) pair is already catalogued
    pub async fn exists_by_title_and_author(&self, title: &str, author: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE title = $1 AND author = $2)",
        )
        .bind(title)
        .bind(author)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // ===== WRITE =====

    /// Insert a new book and return the stored row
    pub async fn create(&self, book: &Book) -> AppResult<Book> {
        let now = Utc::now();
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                title, author, cover_image, genre, isbn, publication_date,
                description, publisher, language, page_count, format,
                subjects, open_library_id, contributors, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.cover_image)
        .bind(&book.genre)
        .bind(&book.isbn)
        .bind(&book.publication_date)
        .bind(&book.description)
        .bind(&book.publisher)
        .bind(&book.language)
        .bind(book.page_count)
        .bind(&book.format)
        .bind(&book.subjects)
        .bind(&book.open_library_id)
        .bind(&book.contributors)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_duplicate(e, &book.title, &book.author))
    }

    /// Replace every stored field of a book and return the updated row
    pub async fn update(&self, id: i32, book: &Book) -> AppResult<Book> {
        let now = Utc::now();
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = $1, author = $2, cover_image = $3, genre = $4,
                isbn = $5, publication_date = $6, description = $7,
                publisher = $8, language = $9, page_count = $10, format = $11,
                subjects = $12, open_library_id = $13, contributors = $14,
                updated_at = $15
            WHERE id = $16
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.cover_image)
        .bind(&book.genre)
        .bind(&book.isbn)
        .bind(&book.publication_date)
        .bind(&book.description)
        .bind(&book.publisher)
        .bind(&book.language)
        .bind(book.page_count)
        .bind(&book.format)
        .bind(&book.subjects)
        .bind(&book.open_library_id)
        .bind(&book.contributors)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_duplicate(e, &book.title, &book.author))?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Delete a book. Deleting an id that is already absent is a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("Delete of absent book {}", id);
        }

        Ok(())
    }

    /// Empty the catalog
    pub async fn delete_all(&self) -> AppResult<()> {
        sqlx::query("DELETE FROM books").execute(&self.pool).await?;
        Ok(())
    }
}

/// Turn a unique-index violation on (title, author) into a conflict the API
/// can report; pass every other database error through.
fn map_duplicate(e: sqlx::Error, title: &Option<String>, author: &Option<String>) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.constraint() == Some(TITLE_AUTHOR_KEY) {
            return AppError::Conflict(format!(
                "Book \"{}\" by {} is already in the catalog",
                title.as_deref().unwrap_or("?"),
                author.as_deref().unwrap_or("?"),
            ));
        }
    }
    AppError::Database(e)
}
