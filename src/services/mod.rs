//! Business logic services

pub mod authors;
pub mod books;
pub mod genres;
pub mod loans;
pub mod members;
pub mod validation;

use crate::{config::LoansConfig, error::AppError, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub members: members::MembersService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, loans_config: &LoansConfig) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            loans: loans::LoansService::new(repository, loans_config),
        }
    }
}

/// Turn a store-level unique violation into the validation error the
/// pre-check would have raised. Other errors pass through untouched.
pub(crate) fn on_unique_violation(message: &'static str) -> impl Fn(AppError) -> AppError {
    move |err| {
        if err.is_unique_violation() {
            tracing::warn!("Unique constraint rejected write: {}", message);
            AppError::Validation(message.to_string())
        } else {
            err
        }
    }
}
