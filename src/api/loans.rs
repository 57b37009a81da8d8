//! Loan management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        loan::{CreateLoan, LoanDetails},
        pagination::PageQuery,
        report::MemberBorrowRecord,
    },
};

use super::{listing, Listing};

/// Borrow/return response
#[derive(Serialize, ToSchema)]
pub struct LoanResponse {
    pub message: String,
    pub data: LoanDetails,
}

/// Lend a book to a member
#[utoipa::path(
    post,
    path = "/loans/borrow",
    tag = "loans",
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = LoanResponse),
        (status = 400, description = "Unknown book/member or already borrowed", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<LoanResponse>)> {
    let loan = state.services.loans.borrow(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(LoanResponse {
            message: format!("{} borrowed {}.", loan.member_name, loan.book_title),
            data: loan,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    params(("id" = i64, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Book returned", body = LoanResponse),
        (status = 400, description = "Already returned", body = crate::error::ErrorResponse),
        (status = 404, description = "Loan not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(loan_id): Path<i64>,
) -> AppResult<Json<LoanResponse>> {
    let loan = state.services.loans.return_loan(loan_id).await?;

    Ok(Json(LoanResponse {
        message: format!("{} returned {}.", loan.member_name, loan.book_title),
        data: loan,
    }))
}

/// Active loans, newest first
#[utoipa::path(
    get,
    path = "/loans/active",
    tag = "loans",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10, max: 1000)")
    ),
    responses(
        (status = 200, description = "Page of active loans, total in X-Total-Count", body = Vec<LoanDetails>)
    )
)]
pub async fn list_active_loans(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Listing<LoanDetails>> {
    let page = query.normalize(&state.config.pagination);

    let total = state.services.loans.count_active().await?;
    let loans = state.services.loans.list_active(page).await?;
    Ok(listing(total, loans))
}

/// Borrowing history of a member, newest first
#[utoipa::path(
    get,
    path = "/members/{id}/history",
    tag = "loans",
    params(
        ("id" = i64, Path, description = "Member ID"),
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10, max: 1000)")
    ),
    responses(
        (status = 200, description = "Page of history records, total in X-Total-Count", body = Vec<MemberBorrowRecord>),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn member_history(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> AppResult<Listing<MemberBorrowRecord>> {
    let page = query.normalize(&state.config.pagination);

    let total = state.services.loans.count_member_history(member_id).await?;
    let history = state.services.loans.member_history(member_id, page).await?;
    Ok(listing(total, history))
}

/// Loans a member currently holds
#[utoipa::path(
    get,
    path = "/members/{id}/loans",
    tag = "loans",
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member's active loans", body = Vec<LoanDetails>),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn member_active_loans(
    State(state): State<crate::AppState>,
    Path(member_id): Path<i64>,
) -> AppResult<Json<Vec<LoanDetails>>> {
    let loans = state.services.loans.active_loans_for_member(member_id).await?;
    Ok(Json(loans))
}
