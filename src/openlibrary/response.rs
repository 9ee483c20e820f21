//! Typed Open Library search response.
//!
//! Every field a document may carry is optional, and multi-valued fields
//! decode to an empty vector when absent. Accessing a field is always an
//! explicit presence check, never a panic.

use serde::Deserialize;

/// Top-level payload of the search endpoint. Matching documents live under
/// the `docs` key, best match first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
    #[serde(default, rename = "numFound")]
    pub num_found: i64,
}

impl SearchResponse {
    /// Decode a raw search response body.
    ///
    /// A body that is not valid JSON or not the expected shape is an
    /// explicit error. The caller decides whether to degrade to an
    /// unenriched record (create) or fail the operation (search).
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Best-ranked document, if the search matched anything.
    pub fn first_doc(&self) -> Option<&SearchDoc> {
        self.docs.first()
    }
}

/// One bibliographic document from the search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDoc {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Document key, e.g. "/works/OL45883W".
    pub key: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub isbn: Vec<String>,
    #[serde(default)]
    pub publisher: Vec<String>,
    #[serde(default)]
    pub language: Vec<String>,
    #[serde(default)]
    pub subject: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub number_of_pages_median: Option<i32>,
    pub format: Option<String>,
    /// Numeric cover id for the covers endpoint.
    pub cover_i: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_a_partial_document() {
        let body = r#"{"docs":[{"title":"Dune","author_name":["Frank Herbert"],"first_publish_year":1965}]}"#;
        let response = SearchResponse::from_json(body).unwrap();

        let doc = response.first_doc().unwrap();
        assert_eq!(doc.title.as_deref(), Some("Dune"));
        assert_eq!(doc.author_name, vec!["Frank Herbert"]);
        assert_eq!(doc.first_publish_year, Some(1965));
        assert!(doc.isbn.is_empty());
        assert!(doc.cover_i.is_none());
    }

    #[test]
    fn test_missing_docs_key_means_no_documents() {
        let response = SearchResponse::from_json("{}").unwrap();
        assert!(response.first_doc().is_none());
        assert_eq!(response.num_found, 0);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let body = r#"{"numFound":1,"q":"dune","docs":[{"title":"Dune","ebook_access":"borrowable"}]}"#;
        let response = SearchResponse::from_json(body).unwrap();
        assert_eq!(response.num_found, 1);
        assert_eq!(response.docs.len(), 1);
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(SearchResponse::from_json("not json at all").is_err());
        assert!(SearchResponse::from_json(r#"{"docs":"oops"}"#).is_err());
    }
}
