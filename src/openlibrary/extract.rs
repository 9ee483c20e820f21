//! Mapping from search documents to book records.
//!
//! One place owns every field rule. Scalar book attributes take the first
//! element of multi-valued upstream fields; list attributes keep the full
//! ordered list; anything absent upstream stays unset.

use crate::models::book::Book;

use super::response::SearchDoc;

/// Enrichment attributes extracted from one search document.
///
/// Never carries identity: no store id and no caller-supplied title or
/// author, so applying it to an existing record cannot clobber them.
#[derive(Debug, Clone, Default)]
pub struct BookMetadata {
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub publication_date: Option<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub page_count: i32,
    pub format: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub open_library_id: Option<String>,
    pub contributors: Option<Vec<String>>,
}

impl From<&SearchDoc> for BookMetadata {
    fn from(doc: &SearchDoc) -> Self {
        Self {
            // The first subject stands in for a genre; the full list is
            // kept under `subjects`.
            genre: doc.subject.first().cloned(),
            isbn: doc.isbn.first().cloned(),
            publication_date: doc.first_publish_year.map(|year| year.to_string()),
            description: doc.subtitle.clone(),
            publisher: doc.publisher.first().cloned(),
            language: doc.language.first().cloned(),
            page_count: doc.number_of_pages_median.unwrap_or(0),
            format: doc.format.clone(),
            subjects: non_empty(doc.subject.clone()),
            open_library_id: doc.key.clone(),
            contributors: non_empty(doc.author_name.clone()),
        }
    }
}

impl BookMetadata {
    /// Overlay the enrichment fields onto an existing record, leaving its
    /// identity (id, title, author) and cover untouched.
    pub fn apply_to(self, book: &mut Book) {
        book.genre = self.genre;
        book.isbn = self.isbn;
        book.publication_date = self.publication_date;
        book.description = self.description;
        book.publisher = self.publisher;
        book.language = self.language;
        book.page_count = self.page_count;
        book.format = self.format;
        book.subjects = self.subjects;
        book.open_library_id = self.open_library_id;
        book.contributors = self.contributors;
    }
}

/// Whole-document mode: title and author come from the document itself, the
/// author being the first listed name. Used for catalog search results,
/// which are never persisted.
impl From<&SearchDoc> for Book {
    fn from(doc: &SearchDoc) -> Self {
        let mut book = Book {
            title: doc.title.clone(),
            author: doc.author_name.first().cloned(),
            ..Book::default()
        };
        BookMetadata::from(doc).apply_to(&mut book);
        book
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
