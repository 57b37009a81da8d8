//! Loan management service
//!
//! A loan is created active (no return date) and moves once, for good, to
//! returned when the book comes back.

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::{
        loan::{CreateLoan, LoanDetails},
        report::{MemberBorrowRecord, OverdueLoan},
        Pagination,
    },
    repository::Repository,
};

use super::on_unique_violation;

pub(crate) const ALREADY_BORROWED: &str = "Member already has an active loan for this book";
const ALREADY_RETURNED: &str = "Book already returned";

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    loan_period_days: i64,
}

impl LoansService {
    pub fn new(repository: Repository, config: &LoansConfig) -> Self {
        Self {
            repository,
            loan_period_days: config.loan_period_days,
        }
    }

    pub async fn get(&self, id: i64) -> AppResult<LoanDetails> {
        self.repository
            .loans
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", id)))
    }

    /// Lend a book to a member
    pub async fn borrow(&self, data: &CreateLoan) -> AppResult<LoanDetails> {
        if self
            .repository
            .loans
            .has_active_loan(data.book_id, data.member_id)
            .await?
        {
            return Err(AppError::Validation(ALREADY_BORROWED.to_string()));
        }

        if self.repository.books.get_by_id(data.book_id).await?.is_none() {
            return Err(AppError::Validation("Please select a valid book.".to_string()));
        }
        if self.repository.members.get_by_id(data.member_id).await?.is_none() {
            return Err(AppError::Validation("Please select a valid member.".to_string()));
        }

        let loan = self
            .repository
            .loans
            .create(data.book_id, data.member_id, Utc::now())
            .await
            .map_err(on_unique_violation(ALREADY_BORROWED))?;

        tracing::info!(
            "Created a loan for book '{}' to member '{}'",
            loan.book_title,
            loan.member_name
        );
        Ok(loan)
    }

    /// Close an active loan
    pub async fn return_loan(&self, id: i64) -> AppResult<LoanDetails> {
        let loan = self.get(id).await?;
        if !loan.is_active() {
            return Err(AppError::Validation(ALREADY_RETURNED.to_string()));
        }

        // A concurrent return may have won since the read above.
        let loan = self
            .repository
            .loans
            .mark_returned(id, Utc::now())
            .await?
            .ok_or_else(|| AppError::Validation(ALREADY_RETURNED.to_string()))?;

        tracing::info!(
            "Member '{}' returned book '{}'",
            loan.member_name,
            loan.book_title
        );
        Ok(loan)
    }

    /// Active loans, newest first
    pub async fn list_active(&self, page: Pagination) -> AppResult<Vec<LoanDetails>> {
        self.repository.loans.list_active(page).await
    }

    pub async fn count_active(&self) -> AppResult<i64> {
        self.repository.loans.count_active().await
    }

    /// Active loans held by one member
    pub async fn active_loans_for_member(&self, member_id: i64) -> AppResult<Vec<LoanDetails>> {
        self.ensure_member(member_id).await?;
        self.repository.loans.active_for_member(member_id).await
    }

    /// A member's loans, active and returned, newest first
    pub async fn member_history(
        &self,
        member_id: i64,
        page: Pagination,
    ) -> AppResult<Vec<MemberBorrowRecord>> {
        self.ensure_member(member_id).await?;
        self.repository.loans.member_history(member_id, page).await
    }

    pub async fn count_member_history(&self, member_id: i64) -> AppResult<i64> {
        self.ensure_member(member_id).await?;
        self.repository.loans.count_member_history(member_id).await
    }

    /// Active loans held longer than the loan period
    pub async fn overdue_loans(&self) -> AppResult<Vec<OverdueLoan>> {
        let active = self.repository.loans.list_all_active().await?;
        Ok(collect_overdue(active, Utc::now(), self.loan_period_days))
    }

    async fn ensure_member(&self, member_id: i64) -> AppResult<()> {
        if self.repository.members.get_by_id(member_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Member {} not found", member_id)));
        }
        Ok(())
    }
}

/// Keep the active loans older than `period_days` as of `now`.
///
/// `days_overdue` is the time past the period truncated to whole days.
/// Most overdue first, oldest loan first on ties.
pub fn collect_overdue(
    loans: Vec<LoanDetails>,
    now: DateTime<Utc>,
    period_days: i64,
) -> Vec<OverdueLoan> {
    let period = Duration::days(period_days);

    let mut overdue: Vec<OverdueLoan> = loans
        .into_iter()
        .filter(|loan| loan.is_active())
        .filter_map(|loan| {
            let held = now - loan.loan_date;
            if held <= period {
                return None;
            }
            Some(OverdueLoan {
                loan_id: loan.id,
                book_title: loan.book_title,
                member_name: loan.member_name,
                loan_date: loan.loan_date,
                days_overdue: (held - period).num_days(),
            })
        })
        .collect();

    overdue.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then_with(|| a.loan_date.cmp(&b.loan_date))
    });
    overdue
}
