//! Shared fixtures for the integration tests
#![allow(dead_code)]

use stacks_server::{
    config::{AppConfig, DatabaseConfig},
    error::AppError,
    models::{
        author::{Author, AuthorPayload},
        book::{Book, CreateBook},
        genre::{Genre, GenrePayload},
        member::{Member, MemberPayload},
    },
    repository::{self, Repository},
    AppState,
};

/// Fresh in-memory database with the schema applied
pub async fn test_state() -> AppState {
    let config = AppConfig {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            seed: false,
        },
        ..AppConfig::default()
    };

    let pool = repository::create_pool(&config.database)
        .await
        .expect("in-memory pool");
    repository::run_migrations(&pool).await.expect("migrations");

    AppState::new(config, Repository::new(pool))
}

pub async fn author(state: &AppState, name: &str, birth_year: i64) -> Author {
    state
        .services
        .authors
        .create(&AuthorPayload {
            name: name.to_string(),
            birth_year: Some(birth_year),
        })
        .await
        .expect("create author")
}

pub async fn genre(state: &AppState, name: &str) -> Genre {
    state
        .services
        .genres
        .create(&GenrePayload {
            name: name.to_string(),
        })
        .await
        .expect("create genre")
}

pub async fn book(state: &AppState, title: &str, isbn: &str, author_id: i64, genre_id: i64) -> Book {
    state
        .services
        .books
        .create(&CreateBook {
            title: title.to_string(),
            isbn: isbn.to_string(),
            author_id,
            genre_id,
        })
        .await
        .expect("create book")
}

pub async fn member(state: &AppState, name: &str, email: &str) -> Member {
    state
        .services
        .members
        .create(&MemberPayload {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await
        .expect("create member")
}

/// One author, one genre and one book ready to lend
pub async fn catalogue(state: &AppState) -> (Author, Genre, Book) {
    let author = author(state, "Frank Herbert", 1920).await;
    let genre = genre(state, "Sci-Fi").await;
    let book = book(state, "Dune", "9780441172719", author.id, genre.id).await;
    (author, genre, book)
}

/// Message of a validation error, panics on anything else
pub fn validation_message<T: std::fmt::Debug>(result: Result<T, AppError>) -> String {
    match result {
        Err(AppError::Validation(msg)) => msg,
        other => panic!("expected validation error, got {:?}", other),
    }
}

pub fn is_not_found<T>(result: &Result<T, AppError>) -> bool {
    matches!(result, Err(AppError::NotFound(_)))
}
