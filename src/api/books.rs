//! Book catalogue endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook, UpdateBook},
        pagination::PageQuery,
    },
};

use super::{listing, Listing, MessageResponse};

/// Book write response
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub data: Book,
}

/// Optional `?genre=` filter on the book list
#[derive(Debug, Default, Deserialize)]
pub struct BookFilter {
    /// Exact genre name
    pub genre: Option<String>,
}

/// List books ordered by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("genre" = Option<String>, Query, description = "Only books of this genre name"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10, max: 1000)")
    ),
    responses(
        (status = 200, description = "Page of books, total in X-Total-Count", body = Vec<Book>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
    Query(filter): Query<BookFilter>,
) -> AppResult<Listing<Book>> {
    let page = query.normalize(&state.config.pagination);
    let genre = filter.genre.as_deref();

    let total = state.services.books.count(genre).await?;
    let books = state.services.books.list(page, genre).await?;
    Ok(listing(total, books))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Invalid input, duplicate ISBN or unknown author/genre", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.books.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: format!("Book {} created.", book.title),
            data: book,
        }),
    ))
}

/// Update a book; omitted fields are left unchanged
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateBook>,
) -> AppResult<Json<BookResponse>> {
    let book = state.services.books.update(id, &payload).await?;

    Ok(Json(BookResponse {
        message: format!("Book {} updated.", book.title),
        data: book,
    }))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 400, description = "Book is on loan", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let book = state.services.books.delete(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Book {} deleted.", book.title),
    }))
}
