//! Genre endpoints

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
        genre::{Genre, GenrePayload},
        pagination::PageQuery,
    },
};

use super::{listing, Listing, MessageResponse};

/// Genre write response
#[derive(Serialize, ToSchema)]
pub struct GenreResponse {
    pub message: String,
    pub data: Genre,
}

/// List genres ordered by name
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10, max: 1000)")
    ),
    responses(
        (status = 200, description = "Page of genres, total in X-Total-Count", body = Vec<Genre>)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Listing<Genre>> {
    let page = query.normalize(&state.config.pagination);

    let total = state.services.genres.count().await?;
    let genres = state.services.genres.list(page).await?;
    Ok(listing(total, genres))
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre details", body = Genre),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Genre>> {
    let genre = state.services.genres.get(id).await?;
    Ok(Json(genre))
}

#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = GenrePayload,
    responses(
        (status = 201, description = "Genre created", body = GenreResponse),
        (status = 400, description = "Invalid or duplicate name", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    Json(payload): Json<GenrePayload>,
) -> AppResult<(StatusCode, Json<GenreResponse>)> {
    let genre = state.services.genres.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(GenreResponse {
            message: format!("Genre {} created.", genre.name),
            data: genre,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre ID")),
    request_body = GenrePayload,
    responses(
        (status = 200, description = "Genre renamed", body = GenreResponse),
        (status = 400, description = "Invalid or duplicate name", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<GenrePayload>,
) -> AppResult<Json<GenreResponse>> {
    let genre = state.services.genres.update(id, &payload).await?;

    Ok(Json(GenreResponse {
        message: format!("Genre {} updated.", genre.name),
        data: genre,
    }))
}

#[utoipa::path(
    delete,
    path = "/genres/{id}",
    tag = "genres",
    params(("id" = i64, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre deleted", body = MessageResponse),
        (status = 400, description = "Genre still has books", body = crate::error::ErrorResponse),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_genre(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let genre = state.services.genres.delete(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Genre {} deleted.", genre.name),
    }))
}
