//! Genre management service

use crate::{
    error::{AppError, AppResult},
    models::{
        genre::{Genre, GenrePayload},
        Pagination,
    },
    repository::Repository,
};

use super::{
    on_unique_violation,
    validation::{require_non_empty, same_name},
};

pub(crate) const DUPLICATE_GENRE: &str = "Genre with this name already exists.";

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i64) -> AppResult<Genre> {
        self.repository
            .genres
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))
    }

    pub async fn list(&self, page: Pagination) -> AppResult<Vec<Genre>> {
        self.repository.genres.list(page).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.genres.count().await
    }

    pub async fn create(&self, data: &GenrePayload) -> AppResult<Genre> {
        require_non_empty(&data.name, "Name")?;
        self.ensure_unique(&data.name, None).await?;

        let genre = self
            .repository
            .genres
            .create(&data.name)
            .await
            .map_err(on_unique_violation(DUPLICATE_GENRE))?;

        tracing::info!("Created genre name={}", genre.name);
        Ok(genre)
    }

    pub async fn update(&self, id: i64, data: &GenrePayload) -> AppResult<Genre> {
        require_non_empty(&data.name, "Name")?;
        self.ensure_unique(&data.name, Some(id)).await?;

        let genre = self
            .repository
            .genres
            .update(id, &data.name)
            .await
            .map_err(on_unique_violation(DUPLICATE_GENRE))?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))?;

        tracing::info!("Updated genre name={}", genre.name);
        Ok(genre)
    }

    pub async fn delete(&self, id: i64) -> AppResult<Genre> {
        let genre = self.get(id).await?;

        if self.repository.genres.has_books(id).await? {
            return Err(AppError::Validation(
                "Cannot delete genre with existing books".to_string(),
            ));
        }

        if !self.repository.genres.delete(id).await? {
            return Err(AppError::NotFound(format!("Genre {} not found", id)));
        }

        tracing::info!("Deleted genre name={}", genre.name);
        Ok(genre)
    }

    async fn ensure_unique(&self, name: &str, exclude_id: Option<i64>) -> AppResult<()> {
        let genres = self.repository.genres.list_all().await?;
        if genres
            .iter()
            .any(|g| same_name(&g.name, name) && Some(g.id) != exclude_id)
        {
            return Err(AppError::Validation(DUPLICATE_GENRE.to_string()));
        }
        Ok(())
    }
}
