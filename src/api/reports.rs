//! Reporting endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::report::{MemberActiveLoans, OverdueLoan},
};

/// Members holding at least one loan, busiest first
#[utoipa::path(
    get,
    path = "/reports/members-with-loans",
    tag = "reports",
    responses(
        (status = 200, description = "Members with active loan counts", body = Vec<MemberActiveLoans>)
    )
)]
pub async fn members_with_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<MemberActiveLoans>>> {
    let report = state.services.members.members_with_active_loans().await?;
    Ok(Json(report))
}

/// Active loans past the loan period, most overdue first
#[utoipa::path(
    get,
    path = "/reports/overdue-loans",
    tag = "reports",
    responses(
        (status = 200, description = "Overdue loans", body = Vec<OverdueLoan>)
    )
)]
pub async fn overdue_loans(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<OverdueLoan>>> {
    let report = state.services.loans.overdue_loans().await?;
    Ok(Json(report))
}
