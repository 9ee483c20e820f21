//! Exlibris Personal Book Catalog
//!
//! A Rust REST API server for a personal book catalog, enriching stored
//! records with bibliographic metadata from Open Library.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod openlibrary;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
