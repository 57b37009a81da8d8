//! Member management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        member::{Member, MemberPayload},
        report::MemberActiveLoans,
        Pagination,
    },
    repository::Repository,
};

use super::{
    on_unique_violation,
    validation::{require_non_empty, validate_email},
};

pub(crate) const DUPLICATE_EMAIL: &str = "Email already in use.";

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get(&self, id: i64) -> AppResult<Member> {
        self.repository
            .members
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))
    }

    pub async fn list(&self, page: Pagination) -> AppResult<Vec<Member>> {
        self.repository.members.list(page).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.members.count().await
    }

    /// Register a new member with a unique email
    pub async fn create(&self, data: &MemberPayload) -> AppResult<Member> {
        validate_email(&data.email)?;
        self.ensure_email_unique(&data.email, None).await?;
        require_non_empty(&data.name, "Name")?;

        let member = self
            .repository
            .members
            .create(&data.name, &data.email, Utc::now())
            .await
            .map_err(on_unique_violation(DUPLICATE_EMAIL))?;

        tracing::info!("Registered member name={}", member.name);
        Ok(member)
    }

    pub async fn update(&self, id: i64, data: &MemberPayload) -> AppResult<Member> {
        validate_email(&data.email)?;
        self.ensure_email_unique(&data.email, Some(id)).await?;
        require_non_empty(&data.name, "Name")?;

        let member = self
            .repository
            .members
            .update(id, &data.name, &data.email)
            .await
            .map_err(on_unique_violation(DUPLICATE_EMAIL))?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))?;

        tracing::info!("Updated member name={}", member.name);
        Ok(member)
    }

    /// Delete a member without open loans; their returned loans go with them
    pub async fn delete(&self, id: i64) -> AppResult<Member> {
        let member = self.get(id).await?;

        if self.repository.members.has_active_loans(id).await? {
            return Err(AppError::Validation(
                "Cannot delete member with active loans".to_string(),
            ));
        }

        if !self.repository.members.delete(id).await? {
            return Err(AppError::NotFound(format!("Member {} not found", id)));
        }

        tracing::info!("Deleted member name={}", member.name);
        Ok(member)
    }

    /// Members currently holding loans, most loans first then by name
    pub async fn members_with_active_loans(&self) -> AppResult<Vec<MemberActiveLoans>> {
        self.repository.members.members_with_active_loans().await
    }

    async fn ensure_email_unique(&self, email: &str, exclude_id: Option<i64>) -> AppResult<()> {
        if self.repository.members.email_exists(email, exclude_id).await? {
            return Err(AppError::Validation(DUPLICATE_EMAIL.to_string()));
        }
        Ok(())
    }
}
