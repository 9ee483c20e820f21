//! API handlers for Exlibris REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
