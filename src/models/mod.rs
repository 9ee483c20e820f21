//! Data models for Exlibris

pub mod book;

// Re-export commonly used types
pub use book::{Book, BookQuery, CreateBookRequest};
