use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::{CurrentUser, require_super_admin};
use super::validation::{validate_email, validate_password, validate_required, validate_user_id};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::constants::roles;
use crate::services::UserDto;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// GET /users (super admin)
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<UserDto>>>, ApiError> {
    require_super_admin(&user)?;

    let users = state.admin_service().list_users().await?;

    Ok(Json(ApiResponse::success(users)))
}

/// POST /users (super admin)
/// Create a pre-approved account with an admin-assigned role.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    require_super_admin(&user)?;

    let name = validate_required(&payload.name, "Name")?;
    let email = validate_email(&payload.email)?;
    let password = validate_password(&payload.password)?;

    if payload.role != roles::USER && payload.role != roles::SUPER_ADMIN {
        return Err(ApiError::validation(format!(
            "Invalid role: {}. Use '{}' or '{}'",
            payload.role,
            roles::USER,
            roles::SUPER_ADMIN
        )));
    }

    let created = state
        .admin_service()
        .create_user(name, email, password, &payload.role)
        .await?;

    Ok(Json(ApiResponse::success(created)))
}

/// DELETE /users/{id} (super admin)
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_super_admin(&user)?;
    let id = validate_user_id(id)?;

    state.admin_service().delete_user(id).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "User deleted",
    ))))
}

/// POST /users/{id}/approve (super admin)
pub async fn approve_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    require_super_admin(&user)?;
    let id = validate_user_id(id)?;

    let updated = state.admin_service().approve(id).await?;

    Ok(Json(ApiResponse::success(updated)))
}

/// POST /users/{id}/block (super admin)
pub async fn block_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    require_super_admin(&user)?;
    let id = validate_user_id(id)?;

    let updated = state.admin_service().block(id).await?;

    Ok(Json(ApiResponse::success(updated)))
}

/// POST /users/{id}/unblock (super admin)
pub async fn unblock_user(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    require_super_admin(&user)?;
    let id = validate_user_id(id)?;

    let updated = state.admin_service().unblock(id).await?;

    Ok(Json(ApiResponse::success(updated)))
}
