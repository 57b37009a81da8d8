//! Genre model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Genre record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Create or rename genre request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenrePayload {
    pub name: String,
}
