use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::validation::validate_required;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::{ClientProfileDto, ClientProfileInput};

#[derive(Deserialize)]
pub struct ClientProfileRequest {
    pub name: String,
    pub website: String,
    #[serde(default)]
    pub prompt: String,
}

impl ClientProfileRequest {
    fn into_input(self) -> Result<ClientProfileInput, ApiError> {
        let name = validate_required(&self.name, "Name")?.to_string();
        let website = validate_required(&self.website, "Website")?.to_string();

        Ok(ClientProfileInput {
            name,
            website,
            prompt: self.prompt,
        })
    }
}

/// POST /clients
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ClientProfileRequest>,
) -> Result<Json<ApiResponse<ClientProfileDto>>, ApiError> {
    let input = payload.into_input()?;

    let profile = state.client_service().create(user.id, input).await?;

    Ok(Json(ApiResponse::success(profile)))
}

/// GET /clients
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ClientProfileDto>>>, ApiError> {
    let profiles = state.client_service().list().await?;

    Ok(Json(ApiResponse::success(profiles)))
}

/// PUT /clients/{id}
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    Json(payload): Json<ClientProfileRequest>,
) -> Result<Json<ApiResponse<ClientProfileDto>>, ApiError> {
    let input = payload.into_input()?;

    let profile = state.client_service().update(id, user.id, input).await?;

    Ok(Json(ApiResponse::success(profile)))
}

/// DELETE /clients/{id}
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.client_service().delete(id).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new("Deleted"))))
}
