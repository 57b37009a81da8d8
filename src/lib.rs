//! Stacks Library Records Server
//!
//! REST JSON API for a small library: the author, genre and book catalogue,
//! member records, loans and loan reports.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub repository: repository::Repository,
}

impl AppState {
    /// Wire services on top of `repository`
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository.clone(), &config.loans);
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
            repository,
        }
    }
}
