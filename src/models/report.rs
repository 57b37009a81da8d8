//! Aggregate report rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Member together with the number of loans they currently hold
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MemberActiveLoans {
    pub member_id: i64,
    pub name: String,
    pub email: String,
    pub active_loans: i64,
}

/// One entry of a member's borrowing history
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MemberBorrowRecord {
    pub loan_id: i64,
    pub book_id: i64,
    pub book_title: String,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

/// Active loan past the loan period
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OverdueLoan {
    pub loan_id: i64,
    pub book_title: String,
    pub member_name: String,
    pub loan_date: DateTime<Utc>,
    /// Whole days past the loan period
    pub days_overdue: i64,
}
