//! Author management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorPayload},
        Pagination,
    },
    repository::Repository,
};

use super::{
    on_unique_violation,
    validation::{require_non_empty, same_name, validate_birth_year},
};

pub(crate) const DUPLICATE_AUTHOR: &str = "An author with the same name and birth year already exists.";

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i64) -> AppResult<Author> {
        self.repository
            .authors
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    pub async fn list(&self, page: Pagination) -> AppResult<Vec<Author>> {
        self.repository.authors.list(page).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.authors.count().await
    }

    /// Create an author; name + birth year must be unique ignoring case
    pub async fn create(&self, data: &AuthorPayload) -> AppResult<Author> {
        let birth_year = validate_birth_year(data.birth_year)?;
        require_non_empty(&data.name, "Name")?;
        self.ensure_unique(&data.name, birth_year, None).await?;

        let author = self
            .repository
            .authors
            .create(&data.name, birth_year)
            .await
            .map_err(on_unique_violation(DUPLICATE_AUTHOR))?;

        tracing::info!("Created author name={}", author.name);
        Ok(author)
    }

    /// Replace name and birth year of an existing author
    pub async fn update(&self, id: i64, data: &AuthorPayload) -> AppResult<Author> {
        let birth_year = validate_birth_year(data.birth_year)?;
        require_non_empty(&data.name, "Name")?;
        self.ensure_unique(&data.name, birth_year, Some(id)).await?;

        let author = self
            .repository
            .authors
            .update(id, &data.name, birth_year)
            .await
            .map_err(on_unique_violation(DUPLICATE_AUTHOR))?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;

        tracing::info!("Updated author name={}", author.name);
        Ok(author)
    }

    /// Delete an author that no book refers to
    pub async fn delete(&self, id: i64) -> AppResult<Author> {
        let author = self.get(id).await?;

        if self.repository.authors.has_books(id).await? {
            return Err(AppError::Validation(
                "Cannot delete author with existing books".to_string(),
            ));
        }

        if !self.repository.authors.delete(id).await? {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }

        tracing::info!("Deleted author name={}", author.name);
        Ok(author)
    }

    async fn ensure_unique(&self, name: &str, birth_year: i32, exclude_id: Option<i64>) -> AppResult<()> {
        let same_year = self.repository.authors.find_by_birth_year(birth_year).await?;
        let duplicate = same_year
            .iter()
            .any(|a| same_name(&a.name, name) && Some(a.id) != exclude_id);

        if duplicate {
            return Err(AppError::Validation(DUPLICATE_AUTHOR.to_string()));
        }
        Ok(())
    }
}
