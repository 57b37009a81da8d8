//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, genres, health, loans, members, reports};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stacks API",
        version = "1.0.0",
        description = "Library catalogue, membership and loans REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author,
        authors::update_author,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre,
        genres::update_genre,
        genres::delete_genre,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Members
        members::list_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::delete_member,
        // Loans
        loans::borrow_book,
        loans::return_book,
        loans::list_active_loans,
        loans::member_history,
        loans::member_active_loans,
        // Reports
        reports::members_with_loans,
        reports::overdue_loans,
    ),
    components(
        schemas(
            crate::models::author::Author,
            crate::models::author::AuthorPayload,
            authors::AuthorResponse,
            crate::models::genre::Genre,
            crate::models::genre::GenrePayload,
            genres::GenreResponse,
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookResponse,
            crate::models::member::Member,
            crate::models::member::MemberPayload,
            members::MemberResponse,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoan,
            loans::LoanResponse,
            crate::models::report::MemberActiveLoans,
            crate::models::report::MemberBorrowRecord,
            crate::models::report::OverdueLoan,
            crate::api::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "books", description = "Book catalogue"),
        (name = "members", description = "Member management"),
        (name = "loans", description = "Borrowing and returns"),
        (name = "reports", description = "Loan reports")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
