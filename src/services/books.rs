//! Book catalogue service

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        Pagination,
    },
    repository::Repository,
};

use super::{
    on_unique_violation,
    validation::{require_non_empty, validate_isbn},
};

pub(crate) const DUPLICATE_BOOK: &str = "Book already exists.";

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i64) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// List books, optionally only those of the genre named `genre`
    pub async fn list(&self, page: Pagination, genre: Option<&str>) -> AppResult<Vec<Book>> {
        self.repository.books.list(page, genre).await
    }

    pub async fn count(&self, genre: Option<&str>) -> AppResult<i64> {
        self.repository.books.count(genre).await
    }

    /// Create a book linked to exactly one author and one genre
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        validate_isbn(&data.isbn)?;
        self.ensure_isbn_unique(&data.isbn, None).await?;
        self.ensure_author_exists(data.author_id).await?;
        self.ensure_genre_exists(data.genre_id).await?;
        require_non_empty(&data.title, "Title")?;

        let book = self
            .repository
            .books
            .create(data)
            .await
            .map_err(on_unique_violation(DUPLICATE_BOOK))?;

        tracing::info!("Created book title={}", book.title);
        Ok(book)
    }

    /// Partially update a book.
    ///
    /// Only supplied fields are validated and written; a supplied author or
    /// genre replaces the current link.
    pub async fn update(&self, id: i64, data: &UpdateBook) -> AppResult<Book> {
        self.get(id).await?;

        if let Some(ref isbn) = data.isbn {
            validate_isbn(isbn)?;
            self.ensure_isbn_unique(isbn, Some(id)).await?;
        }
        if let Some(author_id) = data.author_id {
            self.ensure_author_exists(author_id).await?;
        }
        if let Some(genre_id) = data.genre_id {
            self.ensure_genre_exists(genre_id).await?;
        }
        if let Some(ref title) = data.title {
            require_non_empty(title, "Title")?;
        }

        let book = self
            .repository
            .books
            .update(id, data)
            .await
            .map_err(on_unique_violation(DUPLICATE_BOOK))?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        tracing::info!("Updated book title={}", book.title);
        Ok(book)
    }

    /// Delete a book that is not currently on loan, along with its loan history
    pub async fn delete(&self, id: i64) -> AppResult<Book> {
        let book = self.get(id).await?;

        if self.repository.books.has_active_loans(id).await? {
            return Err(AppError::Validation(
                "Cannot delete book with active loans".to_string(),
            ));
        }

        if !self.repository.books.delete(id).await? {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        tracing::info!("Deleted book title={}", book.title);
        Ok(book)
    }

    async fn ensure_isbn_unique(&self, isbn: &str, exclude_id: Option<i64>) -> AppResult<()> {
        if self.repository.books.isbn_exists(isbn, exclude_id).await? {
            return Err(AppError::Validation(DUPLICATE_BOOK.to_string()));
        }
        Ok(())
    }

    async fn ensure_author_exists(&self, author_id: i64) -> AppResult<()> {
        if self.repository.authors.get_by_id(author_id).await?.is_none() {
            return Err(AppError::Validation("Please select a valid author.".to_string()));
        }
        Ok(())
    }

    async fn ensure_genre_exists(&self, genre_id: i64) -> AppResult<()> {
        if self.repository.genres.get_by_id(genre_id).await?.is_none() {
            return Err(AppError::Validation("Please select a valid genre.".to_string()));
        }
        Ok(())
    }
}
