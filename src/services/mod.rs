//! Business logic services

pub mod catalog;

use crate::{openlibrary::OpenLibraryClient, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository and upstream client
    pub fn new(repository: Repository, openlibrary: OpenLibraryClient) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository, openlibrary),
        }
    }
}
