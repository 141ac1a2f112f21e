use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::auth::{CurrentUser, require_super_admin};
use super::validation::{validate_content_type, validate_required, validate_usage_type};
use super::{ApiError, ApiResponse, AppState};
use crate::services::{
    ContentDto, ContentLogDto, DailyUsage, GenerationRequest, UserMonthlyUsage,
};

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub client_id: i32,
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub length: i32,
    #[serde(rename = "type")]
    pub content_type: String,
    pub headings: i32,
}

impl GenerateRequest {
    fn into_generation(self) -> Result<GenerationRequest, ApiError> {
        let title = validate_required(&self.title, "Title")?.to_string();
        validate_content_type(&self.content_type)?;

        Ok(GenerationRequest {
            client_id: self.client_id,
            title,
            keywords: self.keywords,
            length: self.length,
            content_type: self.content_type,
            headings: self.headings,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    #[serde(flatten)]
    pub params: GenerateRequest,
    pub generated_content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    pub content_id: i32,
}

#[derive(Deserialize)]
pub struct TrackUsageRequest {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize)]
pub struct UsageQuery {
    pub by: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResponse {
    pub generated_content: String,
}

/// Day-mode and default usage reports share one route; exactly one is set.
#[derive(Serialize)]
#[serde(untagged)]
pub enum UsageResponse {
    ByDay(Vec<DailyUsage>),
    ByUser(Vec<UserMonthlyUsage>),
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /content/generate
/// Call the generation API and return the text without persisting.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<ApiResponse<GeneratedResponse>>, ApiError> {
    let request = payload.into_generation()?;

    let generated_content = state.generation_service().generate(&request).await?;

    Ok(Json(ApiResponse::success(GeneratedResponse {
        generated_content,
    })))
}

/// POST /content/save
/// Persist a generated piece for the calling user.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<SaveRequest>,
) -> Result<Json<ApiResponse<ContentDto>>, ApiError> {
    let generated_content = payload.generated_content;
    let request = payload.params.into_generation()?;

    let content = state
        .generation_service()
        .save(user.id, &request, generated_content)
        .await?;

    Ok(Json(ApiResponse::success(content)))
}

/// POST /content/regenerate
/// Re-run the stored prompt and replace the text in place.
pub async fn regenerate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegenerateRequest>,
) -> Result<Json<ApiResponse<GeneratedResponse>>, ApiError> {
    let generated_content = state
        .generation_service()
        .regenerate(payload.content_id)
        .await?;

    Ok(Json(ApiResponse::success(GeneratedResponse {
        generated_content,
    })))
}

/// POST /content/track-usage
/// Tally a generation or regeneration against the caller's monthly record.
pub async fn track_usage(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<TrackUsageRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let kind = validate_usage_type(&payload.kind)?;

    state.generation_service().track_usage(user.id, kind).await?;

    Ok(Json(ApiResponse::success(())))
}

/// GET /content/logs (super admin)
pub async fn logs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<Vec<ContentLogDto>>>, ApiError> {
    require_super_admin(&user)?;

    let logs = state.analytics_service().logs().await?;

    Ok(Json(ApiResponse::success(logs)))
}

/// GET /content/usage (super admin)
/// `?by=day` aggregates the current month per day; otherwise per user/month.
pub async fn usage(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<UsageQuery>,
) -> Result<Json<ApiResponse<UsageResponse>>, ApiError> {
    require_super_admin(&user)?;

    let response = if query.by.as_deref() == Some("day") {
        UsageResponse::ByDay(state.analytics_service().usage_by_day().await?)
    } else {
        UsageResponse::ByUser(state.analytics_service().usage_by_user().await?)
    };

    Ok(Json(ApiResponse::success(response)))
}
