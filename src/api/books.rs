//! Book catalog endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, BookQuery, CreateBook, CreatedId, IdQuery, UpdateBook},
    AppState,
};

use super::ValidatedJson;

/// List books, newest first (public)
#[utoipa::path(
    get,
    path = "/collections/book",
    tag = "books",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive title search"),
        ("last_id" = Option<i64>, Query, description = "Pagination cursor: return books below this pagination id"),
        ("limit" = Option<i64>, Query, description = "Maximum number of books")
    ),
    responses(
        (status = 200, description = "Books", body = Vec<Book>),
        (status = 404, description = "No books found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.search_books(&query).await?;
    Ok(Json(books))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/collections/dashboard/book",
    tag = "books",
    security(("session_cookie" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = CreatedId),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Book already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    ValidatedJson(book): ValidatedJson<CreateBook>,
) -> AppResult<(StatusCode, Json<CreatedId>)> {
    let id = state.services.catalog.create_book(&book).await?;
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/collections/dashboard/book",
    tag = "books",
    security(("session_cookie" = [])),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Invalid id or missing field", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Another book has that title", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    ValidatedJson(book): ValidatedJson<UpdateBook>,
) -> AppResult<StatusCode> {
    state.services.catalog.update_book(&book).await?;
    Ok(StatusCode::OK)
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/collections/dashboard/book",
    tag = "books",
    security(("session_cookie" = [])),
    params(
        ("id" = String, Query, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 400, description = "Missing or invalid id", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book has bookings", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Query(params): Query<IdQuery>,
) -> AppResult<StatusCode> {
    let id = params.parse()?;
    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::OK)
}
