use axum::{
    Extension, Json,
    extract::{Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{validate_email, validate_password, validate_required, validate_user_id};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::LoginResult;

// ============================================================================
// Request types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRequest {
    pub user_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Identity decoded from the bearer token, injected into request extensions
/// for every protected route.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub role: String,
}

impl CurrentUser {
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == crate::constants::roles::SUPER_ADMIN
    }
}

/// Authentication middleware: requires `Authorization: Bearer <token>` with a
/// valid, unexpired signature. Role checks stay with the individual handlers.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token =
        extract_bearer(&headers).ok_or_else(|| ApiError::unauthorized("No token provided"))?;

    let claims = state
        .tokens()
        .verify(token)
        .map_err(|_| ApiError::unauthorized("Invalid token"))?;

    request.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(str::trim)
}

/// Assert the caller holds the super-admin role.
pub fn require_super_admin(user: &CurrentUser) -> Result<(), ApiError> {
    if user.is_super_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Forbidden".to_string()))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
/// Create an unapproved account. No token is issued here.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let name = validate_required(&payload.name, "Name")?;
    let email = validate_email(&payload.email)?;
    let password = validate_password(&payload.password)?;

    state.auth_service().register(name, email, password).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Registered. Awaiting admin approval.",
    ))))
}

/// POST /auth/login
/// Verify credentials and return a signed bearer token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResult>>, ApiError> {
    let email = validate_required(&payload.email, "Email")?;
    let password = validate_required(&payload.password, "Password")?;

    let result = state.auth_service().login(email, password).await?;

    Ok(Json(ApiResponse::success(result)))
}

/// POST /auth/approve
/// Approve an account by id. This legacy surface performs no role check;
/// see DESIGN.md before changing the policy here.
pub async fn approve(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ApproveRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user_id = validate_user_id(payload.user_id)?;

    state.auth_service().approve(user_id).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "User approved",
    ))))
}

/// POST /auth/change-password
/// Change the caller's own password after verifying the current one.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let old_password = validate_required(&payload.old_password, "Current password")?;
    let new_password = validate_password(&payload.new_password)?;

    state
        .auth_service()
        .change_password(user.id, old_password, new_password)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password changed successfully",
    ))))
}

/// POST /auth/forgot-password
/// Issue a time-bounded reset token and email a reset link.
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let email = validate_email(&payload.email)?;

    state.auth_service().forgot_password(email).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password reset email sent",
    ))))
}

/// POST /auth/reset-password/{token}
/// Consume a reset token and set a new password.
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let new_password = validate_password(&payload.new_password)?;

    state
        .auth_service()
        .reset_password(&token, new_password)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(
        "Password reset successfully",
    ))))
}
