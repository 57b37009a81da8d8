//! Loan (borrow) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan with book title and member name joined in
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LoanDetails {
    pub id: i64,
    pub book_id: i64,
    pub member_id: i64,
    pub book_title: String,
    pub member_name: String,
    pub loan_date: DateTime<Utc>,
    /// Unset while the loan is active
    pub return_date: Option<DateTime<Utc>>,
}

impl LoanDetails {
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Borrow request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub book_id: i64,
    pub member_id: i64,
}
