//! Books repository for database operations

use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        Pagination,
    },
};

/// Book row with its single author and genre resolved through the link tables
const BOOK_SELECT: &str = r#"
    SELECT b.id,
           b.title,
           b.isbn,
           a.id AS author_id,
           a.name AS author,
           g.id AS genre_id,
           g.name AS genre,
           EXISTS (
               SELECT 1 FROM loans l
               WHERE l.book_id = b.id AND l.return_date IS NULL
           ) AS is_borrowed
    FROM books b
    LEFT JOIN book_authors ba ON ba.book_id = b.id
    LEFT JOIN authors a ON a.id = ba.author_id
    LEFT JOIN book_genres bg ON bg.book_id = b.id
    LEFT JOIN genres g ON g.id = bg.genre_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!("{} WHERE b.id = ?", BOOK_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// List books ordered by title, optionally restricted to one genre name
    pub async fn list(&self, page: Pagination, genre: Option<&str>) -> AppResult<Vec<Book>> {
        let books = match genre {
            Some(genre) => {
                sqlx::query_as::<_, Book>(&format!(
                    "{} WHERE g.name = ? ORDER BY b.title, b.id LIMIT ? OFFSET ?",
                    BOOK_SELECT
                ))
                .bind(genre)
                .bind(page.limit)
                .bind(page.offset())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Book>(&format!(
                    "{} ORDER BY b.title, b.id LIMIT ? OFFSET ?",
                    BOOK_SELECT
                ))
                .bind(page.limit)
                .bind(page.offset())
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(books)
    }

    /// Count books, honouring the same genre filter as `list`
    pub async fn count(&self, genre: Option<&str>) -> AppResult<i64> {
        let count: i64 = match genre {
            Some(genre) => {
                sqlx::query_scalar(
                    r#"
                    SELECT COUNT(DISTINCT b.id)
                    FROM books b
                    JOIN book_genres bg ON bg.book_id = b.id
                    JOIN genres g ON g.id = bg.genre_id
                    WHERE g.name = ?
                    "#,
                )
                .bind(genre)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM books")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(count)
    }

    /// Check if an ISBN is already used by another book
    pub async fn isbn_exists(&self, isbn: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = ? AND id != ?)")
                .bind(isbn)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = ?)")
                .bind(isbn)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Insert a book and link its author and genre in one transaction
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book_id = sqlx::query("INSERT INTO books (title, isbn) VALUES (?, ?)")
            .bind(&data.title)
            .bind(&data.isbn)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        replace_book_author(&mut *tx, book_id, data.author_id).await?;
        replace_book_genre(&mut *tx, book_id, data.genre_id).await?;

        tx.commit().await?;

        self.get_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Book {} vanished after insert", book_id)))
    }

    /// Apply a partial update, `None` when the book does not exist.
    /// Absent fields keep their stored value.
    pub async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE books SET title = COALESCE(?, title), isbn = COALESCE(?, isbn) WHERE id = ?",
        )
        .bind(&data.title)
        .bind(&data.isbn)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        if let Some(author_id) = data.author_id {
            replace_book_author(&mut *tx, id, author_id).await?;
        }
        if let Some(genre_id) = data.genre_id {
            replace_book_genre(&mut *tx, id, genre_id).await?;
        }

        tx.commit().await?;
        self.get_by_id(id).await
    }

    /// Delete a book with its links and loan history
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        for statement in [
            "DELETE FROM book_authors WHERE book_id = ?",
            "DELETE FROM book_genres WHERE book_id = ?",
            "DELETE FROM loans WHERE book_id = ?",
        ] {
            sqlx::query(statement).bind(id).execute(&mut *tx).await?;
        }
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of unreturned loans for this book
    pub async fn count_active_loans(&self, id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE book_id = ? AND return_date IS NULL",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn has_active_loans(&self, id: i64) -> AppResult<bool> {
        Ok(self.count_active_loans(id).await? > 0)
    }
}

/// Make `author_id` the only author of the book
async fn replace_book_author(
    conn: &mut SqliteConnection,
    book_id: i64,
    author_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM book_authors WHERE book_id = ?")
        .bind(book_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("INSERT INTO book_authors (book_id, author_id) VALUES (?, ?)")
        .bind(book_id)
        .bind(author_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Make `genre_id` the only genre of the book
async fn replace_book_genre(
    conn: &mut SqliteConnection,
    book_id: i64,
    genre_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
        .bind(book_id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("INSERT INTO book_genres (book_id, genre_id) VALUES (?, ?)")
        .bind(book_id)
        .bind(genre_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}
