//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Author record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_year: i32,
}

/// Create or replace author request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AuthorPayload {
    pub name: String,
    /// Four digit year
    pub birth_year: Option<i64>,
}
