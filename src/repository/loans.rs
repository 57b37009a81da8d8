//! Loans repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{loan::LoanDetails, report::MemberBorrowRecord, Pagination},
};

const LOAN_SELECT: &str = r#"
    SELECT l.id, l.book_id, l.member_id, l.loan_date, l.return_date,
           b.title AS book_title,
           m.name AS member_name
    FROM loans l
    JOIN books b ON b.id = l.book_id
    JOIN members m ON m.id = l.member_id
"#;

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Sqlite>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<LoanDetails>> {
        let loan = sqlx::query_as::<_, LoanDetails>(&format!("{} WHERE l.id = ?", LOAN_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(loan)
    }

    /// Whether this member currently holds this book
    pub async fn has_active_loan(&self, book_id: i64, member_id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM loans
                WHERE book_id = ? AND member_id = ? AND return_date IS NULL
            )
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Open a loan dated `loan_date`
    pub async fn create(
        &self,
        book_id: i64,
        member_id: i64,
        loan_date: DateTime<Utc>,
    ) -> AppResult<LoanDetails> {
        let id = sqlx::query(
            r#"
            INSERT INTO loans (book_id, member_id, loan_date, return_date)
            VALUES (?, ?, ?, NULL)
            "#,
        )
        .bind(book_id)
        .bind(member_id)
        .bind(loan_date)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Loan {} vanished after insert", id)))
    }

    /// Stamp the return date on an active loan.
    ///
    /// The `return_date IS NULL` guard makes the transition happen at most
    /// once; `None` means no active loan with this id was found.
    pub async fn mark_returned(
        &self,
        id: i64,
        return_date: DateTime<Utc>,
    ) -> AppResult<Option<LoanDetails>> {
        let result = sqlx::query(
            "UPDATE loans SET return_date = ? WHERE id = ? AND return_date IS NULL",
        )
        .bind(return_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Active loans, newest first
    pub async fn list_active(&self, page: Pagination) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!(
            "{} WHERE l.return_date IS NULL ORDER BY l.loan_date DESC, l.id DESC LIMIT ? OFFSET ?",
            LOAN_SELECT
        ))
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Every active loan, oldest first
    pub async fn list_all_active(&self) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!(
            "{} WHERE l.return_date IS NULL ORDER BY l.loan_date ASC, l.id ASC",
            LOAN_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE return_date IS NULL")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Active loans held by one member, newest first
    pub async fn active_for_member(&self, member_id: i64) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(&format!(
            "{} WHERE l.member_id = ? AND l.return_date IS NULL ORDER BY l.loan_date DESC, l.id DESC",
            LOAN_SELECT
        ))
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Every loan of a member, active and returned, newest first
    pub async fn member_history(
        &self,
        member_id: i64,
        page: Pagination,
    ) -> AppResult<Vec<MemberBorrowRecord>> {
        let rows = sqlx::query_as::<_, MemberBorrowRecord>(
            r#"
            SELECT l.id AS loan_id, l.book_id, l.loan_date, l.return_date,
                   b.title AS book_title
            FROM loans l
            JOIN books b ON b.id = l.book_id
            WHERE l.member_id = ?
            ORDER BY l.loan_date DESC, l.id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(member_id)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_member_history(&self, member_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE member_id = ?")
            .bind(member_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
