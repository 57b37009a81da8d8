//! Member endpoints

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
        member::{Member, MemberPayload},
        pagination::PageQuery,
    },
};

use super::{listing, Listing, MessageResponse};

/// Member write response
#[derive(Serialize, ToSchema)]
pub struct MemberResponse {
    pub message: String,
    pub data: Member,
}

/// List members ordered by name
#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default: 10, max: 1000)")
    ),
    responses(
        (status = 200, description = "Page of members, total in X-Total-Count", body = Vec<Member>)
    )
)]
pub async fn list_members(
    State(state): State<crate::AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Listing<Member>> {
    let page = query.normalize(&state.config.pagination);

    let total = state.services.members.count().await?;
    let members = state.services.members.list(page).await?;
    Ok(listing(total, members))
}

#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member details", body = Member),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Member>> {
    let member = state.services.members.get(id).await?;
    Ok(Json(member))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = MemberPayload,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 400, description = "Invalid input or email in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<crate::AppState>,
    Json(payload): Json<MemberPayload>,
) -> AppResult<(StatusCode, Json<MemberResponse>)> {
    let member = state.services.members.create(&payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MemberResponse {
            message: format!("Member {} created.", member.name),
            data: member,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member ID")),
    request_body = MemberPayload,
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 400, description = "Invalid input or email in use", body = crate::error::ErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<MemberPayload>,
) -> AppResult<Json<MemberResponse>> {
    let member = state.services.members.update(id, &payload).await?;

    Ok(Json(MemberResponse {
        message: format!("Member {} updated.", member.name),
        data: member,
    }))
}

#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Member deleted", body = MessageResponse),
        (status = 400, description = "Member has active loans", body = crate::error::ErrorResponse),
        (status = 404, description = "Member not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_member(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let member = state.services.members.delete(id).await?;

    Ok(Json(MessageResponse {
        message: format!("Member {} deleted.", member.name),
    }))
}
