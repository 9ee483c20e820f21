//! Open Library integration
//!
//! This module provides the HTTP client for the Open Library search and
//! covers endpoints, the typed search response, and the mapping from search
//! documents onto book records.

pub mod client;
pub mod extract;
pub mod response;

pub use client::OpenLibraryClient;
pub use extract::BookMetadata;
pub use response::{SearchDoc, SearchResponse};
