//! Authors repository for database operations

use sqlx::{Pool, Sqlite};

use crate::{
    error::AppResult,
    models::{author::Author, Pagination},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get author by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_year FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }

    /// List authors ordered by name
    pub async fn list(&self, page: Pagination) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_year FROM authors ORDER BY name, id LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// All authors born in `birth_year`
    pub async fn find_by_birth_year(&self, birth_year: i32) -> AppResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_year FROM authors WHERE birth_year = ?",
        )
        .bind(birth_year)
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    /// Create a new author
    pub async fn create(&self, name: &str, birth_year: i32) -> AppResult<Author> {
        let id = sqlx::query("INSERT INTO authors (name, birth_year) VALUES (?, ?)")
            .bind(name)
            .bind(birth_year)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(Author {
            id,
            name: name.to_string(),
            birth_year,
        })
    }

    /// Update an author, `None` when the row does not exist
    pub async fn update(&self, id: i64, name: &str, birth_year: i32) -> AppResult<Option<Author>> {
        let result = sqlx::query("UPDATE authors SET name = ?, birth_year = ? WHERE id = ?")
            .bind(name)
            .bind(birth_year)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete an author together with its book links
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM book_authors WHERE author_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether any book is linked to this author
    pub async fn has_books(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM book_authors WHERE author_id = ?)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
