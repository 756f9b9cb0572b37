//! User handlers.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt, RequestContext};
use domain::{Page, PageRequest, User, UserDraft, DEFAULT_PAGE_INDEX, DEFAULT_PAGE_SIZE};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// Optional paging parameters for the user list
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page number (default 1)
    pub page_index: Option<u64>,
    /// Rows per page (default 10, capped at 100)
    pub page_size: Option<u64>,
}

impl ListUsersQuery {
    /// The page to fetch, or `None` for the plain list.
    fn page_request(&self) -> AppResult<Option<PageRequest>> {
        if self.page_index.is_none() && self.page_size.is_none() {
            return Ok(None);
        }

        let page = PageRequest::new(
            self.page_index.unwrap_or(DEFAULT_PAGE_INDEX),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )?;
        Ok(Some(page))
    }
}

/// One page of users with navigation totals
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedUsersResponse {
    pub total_count: u64,
    pub page_index: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub users: Vec<User>,
}

impl From<Page<User>> for PagedUsersResponse {
    fn from(page: Page<User>) -> Self {
        Self {
            total_count: page.total_count,
            page_index: page.page_index,
            page_size: page.page_size,
            total_pages: page.total_pages,
            users: page.items,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Unwrap the `{id}` segment, reporting a malformed id in the error envelope
fn user_id(path: Result<Path<Uuid>, PathRejection>) -> AppResult<Uuid> {
    let Path(id) = path.map_err(|e| AppError::bad_request(e.body_text()))?;
    Ok(id)
}

/// Fetch a user or fail with 404
async fn require_user(state: &AppState, ctx: &RequestContext, id: Uuid) -> AppResult<User> {
    let user = state.user_service.get_user(ctx, id).await?;
    if user.is_none() {
        tracing::warn!(request_id = %ctx.request_id, user_id = %id, "User not found");
    }
    user.ok_or_not_found()
}

/// List users, optionally one page at a time
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "All users, or a page envelope when paging parameters are given", body = Vec<User>),
        (status = 400, description = "Invalid paging parameters")
    )
)]
pub async fn list_users(
    ctx: RequestContext,
    State(state): State<AppState>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query.map_err(|e| AppError::bad_request(e.body_text()))?;

    match query.page_request()? {
        Some(page) => {
            let page = state.user_service.list_users_paginated(&ctx, page).await?;
            Ok(Json(PagedUsersResponse::from(page)).into_response())
        }
        None => {
            let users = state.user_service.list_users(&ctx).await?;
            Ok(Json(users).into_response())
        }
    }
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<User>> {
    let id = user_id(id)?;
    let user = require_user(&state, &ctx, id).await?;
    Ok(Json(user))
}

/// Create a user under a server-assigned id
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserDraft,
    responses(
        (status = 201, description = "User created", body = User,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Validation failed; body is a list of messages", body = Vec<String>)
    )
)]
pub async fn create_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    JsonBody(draft): JsonBody<UserDraft>,
) -> AppResult<impl IntoResponse> {
    let user = state.user_service.create_user(&ctx, draft).await?;
    let location = format!("/users/{}", user.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// Replace every field of an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UserDraft,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Validation failed; body is a list of messages", body = Vec<String>),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    JsonBody(draft): JsonBody<UserDraft>,
) -> AppResult<StatusCode> {
    let id = user_id(id)?;
    require_user(&state, &ctx, id).await?;
    state.user_service.update_user(&ctx, id, draft).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    ctx: RequestContext,
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = user_id(id)?;
    require_user(&state, &ctx, id).await?;
    state.user_service.delete_user(&ctx, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
