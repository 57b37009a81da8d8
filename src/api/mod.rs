//! API handlers for the Stacks REST endpoints

pub mod authors;
pub mod books;
pub mod genres;
pub mod health;
pub mod loans;
pub mod members;
pub mod openapi;
pub mod reports;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Header carrying the unpaginated total of a list endpoint
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// List body plus its `X-Total-Count` header
pub type Listing<T> = ([(&'static str, String); 1], Json<Vec<T>>);

pub(crate) fn listing<T>(total: i64, items: Vec<T>) -> Listing<T> {
    ([(TOTAL_COUNT_HEADER, total.to_string())], Json(items))
}

/// Body of responses that only carry a status message
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Build the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authors
        .route("/authors", get(authors::list_authors).post(authors::create_author))
        .route(
            "/authors/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        // Genres
        .route("/genres", get(genres::list_genres).post(genres::create_genre))
        .route(
            "/genres/:id",
            get(genres::get_genre)
                .put(genres::update_genre)
                .delete(genres::delete_genre),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Members
        .route("/members", get(members::list_members).post(members::create_member))
        .route(
            "/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route("/members/:id/history", get(loans::member_history))
        .route("/members/:id/loans", get(loans::member_active_loans))
        // Loans
        .route("/loans/borrow", post(loans::borrow_book))
        .route("/loans/active", get(loans::list_active_loans))
        .route("/loans/:id/return", post(loans::return_book))
        // Reports
        .route("/reports/members-with-loans", get(reports::members_with_loans))
        .route("/reports/overdue-loans", get(reports::overdue_loans))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
