//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBookRequest},
    openlibrary::{BookMetadata, OpenLibraryClient, SearchResponse},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    openlibrary: OpenLibraryClient,
}

impl CatalogService {
    pub fn new(repository: Repository, openlibrary: OpenLibraryClient) -> Self {
        Self {
            repository,
            openlibrary,
        }
    }

    /// Verify store connectivity, for the readiness probe
    pub async fn ping_store(&self) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.repository.pool)
            .await?;
        Ok(())
    }

    /// List every book in the catalog
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Get a single book by id
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a book from its title and author, enriched with whatever
    /// Open Library knows about it. Enrichment is best-effort: upstream
    /// failures store an unenriched record rather than failing the create.
    pub async fn create(&self, request: CreateBookRequest) -> AppResult<Book> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .books
            .exists_by_title_and_author(&request.title, &request.author)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Book \"{}\" by {} is already in the catalog",
                request.title, request.author
            )));
        }

        let mut book = Book::new(request.title.clone(), request.author.clone());
        self.enrich(&mut book, &request).await;

        let created = self.repository.books.create(&book).await?;
        tracing::info!(
            "Catalogued \"{}\" by {} as book {}",
            request.title,
            request.author,
            created.id.unwrap_or(-1)
        );
        Ok(created)
    }

    /// Replace every stored field of a book. The id and creation timestamp
    /// are kept; everything else takes the caller's value, including nulls.
    pub async fn update(&self, id: i32, book: Book) -> AppResult<Book> {
        if is_blank(&book.title) || is_blank(&book.author) {
            return Err(AppError::Validation(
                "Title and author must not be empty".to_string(),
            ));
        }
        self.repository.books.update(id, &book).await
    }

    /// Remove a book. Removing an id that is already gone is a no-op.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }

    /// Empty the catalog
    pub async fn delete_all(&self) -> AppResult<()> {
        self.repository.books.delete_all().await
    }

    /// Search Open Library with the given filters. Results are mapped
    /// straight from the response documents and never persisted.
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        if query.is_empty() {
            return Err(AppError::Validation(
                "At least one of title, author or isbn is required".to_string(),
            ));
        }

        let body = self.openlibrary.search(query).await?;
        let response = SearchResponse::from_json(&body).map_err(|e| {
            AppError::MalformedUpstream(format!("Unreadable search response: {}", e))
        })?;

        tracing::debug!(
            "Open Library matched {} document(s), returning {}",
            response.num_found,
            response.docs.len()
        );

        Ok(response.docs.iter().map(Book::from).collect())
    }

    /// Look up a cover image by Open Library identifier. A missing cover
    /// and an unreachable covers endpoint both read as "no cover".
    pub async fn fetch_cover(&self, olid: &str) -> AppResult<Option<Vec<u8>>> {
        if olid.trim().is_empty() {
            return Err(AppError::Validation("olid must not be empty".to_string()));
        }

        match self.openlibrary.fetch_cover_by_olid(olid).await {
            Ok(cover) => Ok(cover),
            Err(e) => {
                tracing::warn!("Cover lookup for {} failed: {}", olid, e);
                Ok(None)
            }
        }
    }

    /// Fill the enrichment fields of a fresh record from the best search
    /// match. Any upstream problem leaves the record as it was.
    async fn enrich(&self, book: &mut Book, request: &CreateBookRequest) {
        let query = BookQuery::title_author(&request.title, &request.author);

        let body = match self.openlibrary.search(&query).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Enrichment search failed, storing bare record: {}", e);
                return;
            }
        };

        let response = match SearchResponse::from_json(&body) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    "Enrichment response unreadable, storing bare record: {}",
                    e
                );
                return;
            }
        };

        let doc = match response.first_doc() {
            Some(doc) => doc,
            None => {
                tracing::info!(
                    "No Open Library match for \"{}\" by {}",
                    request.title,
                    request.author
                );
                return;
            }
        };

        BookMetadata::from(doc).apply_to(book);

        if let Some(cover_id) = doc.cover_i {
            match self.openlibrary.fetch_cover_by_id(cover_id).await {
                Ok(cover) => book.cover_image = cover,
                Err(e) => {
                    tracing::warn!("Cover fetch failed, storing without cover: {}", e)
                }
            }
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
