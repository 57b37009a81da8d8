//! Author endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        author::{Author, AuthorPayload},
        pagination::PageQuery,
    },
};

use super::{listing, Listing, MessageResponse};

/// Author write response
#[derive(Serialize, ToSchema)]
pub struct AuthorResponse {
    pub message: String,
    pub data: Author,
}

/// List authors ordered by name
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10, max: 1000)")
    ),
    responses(
        (status = 200, description = "Page of authors, total in X-Total-Count", body = Vec<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Listing<Author>> {
    let page = query.normalize(&state.config.pagination);

    let total = state.services.authors.count().await?;
    let authors = state.services.authors.list(page).await?;
    Ok(listing(total, authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = Author),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Author>> {
    let author = state.services.authors.get(id).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = AuthorPayload,
    responses(
        (status = 201, description = "Author created", body = AuthorResponse),
        (status = 400, description = "Invalid input or duplicate author", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(payload): Json<AuthorPayload>,
) -> AppResult<(StatusCode, Json<AuthorResponse>)> {
    let author = state.services.authors.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthorResponse {
            message: format!("Author {} created.", author.name),
            data: author,
        }),
    ))
}

/// Replace an author's name and birth year
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author ID")),
    request_body = AuthorPayload,
    responses(
        (status = 200, description = "Author updated", body = AuthorResponse),
        (status = 400, description = "Invalid input or duplicate author", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<AuthorPayload>,
) -> AppResult<Json<AuthorResponse>> {
    let author = state.services.authors.update(id, &payload).await?;

    Ok(Json(AuthorResponse {
        message: format!("Author {} updated.", author.name),
        data: author,
    }))
}

/// Delete an author without books
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i64, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author deleted", body = MessageResponse),
        (status = 400, description = "Author still has books", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let author = state.services.authors.delete(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Author {} deleted.", author.name),
    }))
}
