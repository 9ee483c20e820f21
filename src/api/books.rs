//! Book catalog endpoints

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::book::{Book, BookQuery, CreateBookRequest},
};

#[derive(Deserialize)]
pub struct IdParams {
    pub id: i32,
}

#[derive(Deserialize)]
pub struct CoverParams {
    pub olid: String,
}

/// List all catalogued books
#[utoipa::path(
    get,
    path = "/books/all",
    tag = "books",
    responses(
        (status = 200, description = "Every book in the catalog", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_all().await?;
    Ok(Json(books))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("id" = i32, Query, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_by_id(params.id).await?;
    Ok(Json(book))
}

/// Create a book from its title and author, enriched from Open Library
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing or empty title/author"),
        (status = 409, description = "Book already in the catalog")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBookRequest>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a stored book
#[utoipa::path(
    put,
    path = "/books",
    tag = "books",
    params(
        ("id" = i32, Query, description = "Book id")
    ),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Missing or empty title/author"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Query(params): Query<IdParams>,
    Json(book): Json<Book>,
) -> AppResult<Json<Book>> {
    let updated = state.services.catalog.update(params.id, book).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books",
    tag = "books",
    params(
        ("id" = i32, Query, description = "Book id")
    ),
    responses(
        (status = 204, description = "Book deleted (or was already gone)")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Query(params): Query<IdParams>,
) -> AppResult<StatusCode> {
    state.services.catalog.delete(params.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every book in the catalog
#[utoipa::path(
    delete,
    path = "/books/all",
    tag = "books",
    responses(
        (status = 204, description = "Catalog emptied")
    )
)]
pub async fn delete_all_books(State(state): State<crate::AppState>) -> AppResult<StatusCode> {
    state.services.catalog.delete_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search Open Library without touching the catalog
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(
        ("title" = Option<String>, Query, description = "Title filter"),
        ("author" = Option<String>, Query, description = "Author filter"),
        ("isbn" = Option<String>, Query, description = "ISBN filter")
    ),
    responses(
        (status = 200, description = "Matching books, best match first", body = Vec<Book>),
        (status = 400, description = "No search filter given"),
        (status = 502, description = "Open Library unreachable or unreadable")
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search(&query).await?;
    Ok(Json(books))
}

/// Fetch a cover image by Open Library identifier
#[utoipa::path(
    get,
    path = "/books/searchCover",
    tag = "books",
    params(
        ("olid" = String, Query, description = "Open Library identifier, e.g. OL7440033M")
    ),
    responses(
        (status = 200, description = "Cover image", body = Vec<u8>, content_type = "image/jpeg"),
        (status = 204, description = "No cover available"),
        (status = 400, description = "Empty identifier")
    )
)]
pub async fn search_cover(
    State(state): State<crate::AppState>,
    Query(params): Query<CoverParams>,
) -> AppResult<Response> {
    match state.services.catalog.fetch_cover(&params.olid).await? {
        Some(bytes) => Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
