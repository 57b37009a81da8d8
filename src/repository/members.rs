//! Members repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::{
    error::AppResult,
    models::{member::Member, report::MemberActiveLoans, Pagination},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Sqlite>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(
            "SELECT id, name, email, registered_at FROM members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }

    /// List members ordered by name
    pub async fn list(&self, page: Pagination) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, name, email, registered_at
            FROM members
            ORDER BY name ASC, id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Check if email already exists
    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE email = ? AND id != ?)")
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE email = ?)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Register a new member
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        registered_at: DateTime<Utc>,
    ) -> AppResult<Member> {
        let id = sqlx::query("INSERT INTO members (name, email, registered_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(registered_at)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(Member {
            id,
            name: name.to_string(),
            email: email.to_string(),
            registered_at,
        })
    }

    /// Update name and email, `None` when the member does not exist
    pub async fn update(&self, id: i64, name: &str, email: &str) -> AppResult<Option<Member>> {
        let result = sqlx::query("UPDATE members SET name = ?, email = ? WHERE id = ?")
            .bind(name)
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a member together with their loan history
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM loans WHERE member_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether the member holds any unreturned loan
    pub async fn has_active_loans(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE member_id = ? AND return_date IS NULL)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Members holding at least one active loan, busiest first
    pub async fn members_with_active_loans(&self) -> AppResult<Vec<MemberActiveLoans>> {
        let rows = sqlx::query_as::<_, MemberActiveLoans>(
            r#"
            SELECT m.id AS member_id, m.name, m.email, COUNT(l.id) AS active_loans
            FROM members m
            JOIN loans l ON l.member_id = m.id
            WHERE l.return_date IS NULL
            GROUP BY m.id, m.name, m.email
            ORDER BY active_loans DESC, m.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
