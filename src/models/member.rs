//! Library member model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Member record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

/// Register or update member request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MemberPayload {
    pub name: String,
    pub email: String,
}
