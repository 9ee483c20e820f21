//! Book model and catalog request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A book in the catalog.
///
/// Identity is the store-assigned `id` plus the caller-supplied title and
/// author. Everything else is enrichment filled in from the Open Library
/// search response, so every enrichment field is optional.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    #[serde(default)]
    pub id: Option<i32>,
    pub title: Option<String>,
    pub author: Option<String>,
    /// Raw cover bytes, base64-encoded in JSON bodies.
    #[serde_as(as = "Option<Base64>")]
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Byte)]
    pub cover_image: Option<Vec<u8>>,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub page_count: i32,
    pub format: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub open_library_id: Option<String>,
    pub contributors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    /// Bare record carrying only the caller-supplied identity fields.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
            ..Self::default()
        }
    }
}

/// Payload for creating a book. Title and author form the creation key;
/// every other attribute comes from enrichment.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author must not be empty"))]
    pub author: String,
}

/// Catalog search filters. Any subset may be present, but at least one is
/// required. The same shape is handed down to the Open Library client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
}

impl BookQuery {
    /// True when no filter is present.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.isbn.is_none()
    }

    /// Filter pair used by the create-path enrichment lookup.
    pub fn title_author(title: &str, author: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            author: Some(author.to_string()),
            isbn: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_carries_identity_only() {
        let book = Book::new("Dune", "Frank Herbert");
        assert_eq!(book.title.as_deref(), Some("Dune"));
        assert_eq!(book.author.as_deref(), Some("Frank Herbert"));
        assert!(book.id.is_none());
        assert!(book.genre.is_none());
        assert_eq!(book.page_count, 0);
    }

    #[test]
    fn test_cover_image_serializes_as_base64() {
        let mut book = Book::new("Dune", "Frank Herbert");
        book.cover_image = Some(vec![0xFF, 0xD8, 0xFF]);

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["cover_image"], "/9j/");
    }

    #[test]
    fn test_cover_image_deserializes_from_base64() {
        let book: Book =
            serde_json::from_str(r#"{"title":"Dune","author":"Frank Herbert","cover_image":"/9j/"}"#)
                .unwrap();
        assert_eq!(book.cover_image, Some(vec![0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn test_missing_fields_deserialize_to_none() {
        let book: Book = serde_json::from_str(r#"{"title":"Dune"}"#).unwrap();
        assert_eq!(book.title.as_deref(), Some("Dune"));
        assert!(book.author.is_none());
        assert!(book.cover_image.is_none());
        assert_eq!(book.page_count, 0);
    }

    #[test]
    fn test_empty_query_is_detected() {
        assert!(BookQuery::default().is_empty());
        assert!(!BookQuery::title_author("Dune", "Frank Herbert").is_empty());
        let isbn_only = BookQuery {
            isbn: Some("9780441013593".to_string()),
            ..BookQuery::default()
        };
        assert!(!isbn_only.is_empty());
    }
}
