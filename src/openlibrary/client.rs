//! Open Library HTTP client.
//!
//! Plain GET calls against the search and covers endpoints with bounded
//! timeouts. No retries and no caching: a transport failure is reported to
//! the caller, who decides how to degrade.

use std::time::Duration;

use crate::{
    config::OpenLibraryConfig,
    error::{AppError, AppResult},
    models::book::BookQuery,
};

/// Cover size requested from the covers endpoint (S, M or L).
const COVER_SIZE: char = 'L';

#[derive(Clone)]
pub struct OpenLibraryClient {
    http: reqwest::Client,
    search_url: String,
    covers_url: String,
}

impl OpenLibraryClient {
    /// Build the client once at startup. Cloning is cheap and the inner
    /// reqwest client pools connections across clones.
    pub fn new(config: &OpenLibraryConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            search_url: config.search_url.clone(),
            covers_url: config.covers_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run a bibliographic search and return the raw response body.
    pub async fn search(&self, query: &BookQuery) -> AppResult<String> {
        let params = search_params(query);

        tracing::debug!("Searching Open Library with {:?}", params);

        let response = self
            .http
            .get(&self.search_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Open Library search request failed: {}", e);
                AppError::Upstream(format!("Search request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Open Library search returned HTTP {}", status);
            return Err(AppError::Upstream(format!("Search returned HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read search response: {}", e)))
    }

    /// Fetch a cover image by numeric cover id (the `cover_i` field).
    ///
    /// Ok(None) means no cover exists; only transport failures are errors.
    pub async fn fetch_cover_by_id(&self, cover_id: i64) -> AppResult<Option<Vec<u8>>> {
        let url = format!("{}/b/id/{}-{}.jpg", self.covers_url, cover_id, COVER_SIZE);
        self.fetch_cover(&url).await
    }

    /// Fetch a cover image by Open Library identifier.
    pub async fn fetch_cover_by_olid(&self, olid: &str) -> AppResult<Option<Vec<u8>>> {
        let url = format!(
            "{}/b/olid/{}-{}.jpg",
            self.covers_url,
            normalize_olid(olid),
            COVER_SIZE
        );
        self.fetch_cover(&url).await
    }

    async fn fetch_cover(&self, url: &str) -> AppResult<Option<Vec<u8>>> {
        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::warn!("Cover request failed: {}", e);
            AppError::Upstream(format!("Cover request failed: {}", e))
        })?;

        if !response.status().is_success() {
            tracing::debug!("No cover at {} (HTTP {})", url, response.status());
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to read cover response: {}", e)))?;

        if bytes.is_empty() {
            return Ok(None);
        }

        Ok(Some(bytes.to_vec()))
    }
}

/// Build the search query parameters from whichever filters are present.
fn search_params(query: &BookQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(ref title) = query.title {
        params.push(("title", title.clone()));
    }
    if let Some(ref author) = query.author {
        params.push(("author", author.clone()));
    }
    if let Some(ref isbn) = query.isbn {
        params.push(("isbn", isbn.clone()));
    }
    params
}

/// Reduce an identifier to its bare key. Callers sometimes pass the full
/// document key path ("/works/OL45883W") instead of the identifier alone.
fn normalize_olid(olid: &str) -> &str {
    olid.rsplit('/').next().unwrap_or(olid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_cover_each_present_filter() {
        let query = BookQuery {
            title: Some("Dune".to_string()),
            author: Some("Frank Herbert".to_string()),
            isbn: None,
        };

        let params = search_params(&query);
        assert_eq!(
            params,
            vec![
                ("title", "Dune".to_string()),
                ("author", "Frank Herbert".to_string())
            ]
        );
    }

    #[test]
    fn test_isbn_only_query() {
        let query = BookQuery {
            isbn: Some("9780441013593".to_string()),
            ..BookQuery::default()
        };

        let params = search_params(&query);
        assert_eq!(params, vec![("isbn", "9780441013593".to_string())]);
    }

    #[test]
    fn test_empty_query_yields_no_params() {
        assert!(search_params(&BookQuery::default()).is_empty());
    }

    #[test]
    fn test_normalize_olid() {
        assert_eq!(normalize_olid("OL7440033M"), "OL7440033M");
        assert_eq!(normalize_olid("/works/OL45883W"), "OL45883W");
        assert_eq!(normalize_olid("/books/OL7440033M"), "OL7440033M");
    }
}
