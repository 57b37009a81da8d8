//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book with its current author and genre resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    /// 13 digit ISBN
    pub isbn: String,
    pub author_id: Option<i64>,
    /// Author name
    pub author: Option<String>,
    pub genre_id: Option<i64>,
    /// Genre name
    pub genre: Option<String>,
    /// Whether an unreturned loan references this book
    pub is_borrowed: bool,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: String,
    pub isbn: String,
    pub author_id: i64,
    pub genre_id: i64,
}

/// Update book request; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub isbn: Option<String>,
    pub author_id: Option<i64>,
    pub genre_id: Option<i64>,
}
