//! Domain service for content generation, persistence, and usage tracking.

use serde::Serialize;
use thiserror::Error;

/// Errors specific to generation operations.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Client not found")]
    ClientNotFound,

    #[error("Content not found")]
    ContentNotFound,

    #[error("Invalid usage type")]
    InvalidUsageType,

    #[error("Generation API error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for GenerationError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Parameters controlling a single generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub client_id: i32,
    pub title: String,
    pub keywords: Vec<String>,
    pub length: i32,
    pub content_type: String,
    pub headings: i32,
}

/// A persisted content record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDto {
    pub id: i32,
    pub user_id: i32,
    pub client_id: Option<i32>,
    pub title: String,
    pub keywords: Vec<String>,
    pub length: i32,
    #[serde(rename = "type")]
    pub content_type: String,
    pub headings: i32,
    pub generated_content: String,
    pub generations: i32,
    pub regenerations: i32,
    pub created_at: String,
}

/// Domain service trait for content generation.
#[async_trait::async_trait]
pub trait GenerationService: Send + Sync {
    /// Builds the prompt from the client profile plus the request parameters,
    /// calls the generation API, and returns the raw text without persisting.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::ClientNotFound`] when the client id is
    /// absent and [`GenerationError::Upstream`] on API failure.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Persists a generated piece with generations=1, regenerations=0.
    async fn save(
        &self,
        user_id: i32,
        request: &GenerationRequest,
        generated_content: String,
    ) -> Result<ContentDto, GenerationError>;

    /// Re-runs the stored prompt and replaces the text in place, bumping the
    /// regeneration counter by exactly one.
    async fn regenerate(&self, content_id: i32) -> Result<String, GenerationError>;

    /// Tallies a generation or regeneration against the caller's monthly
    /// usage placeholder record.
    async fn track_usage(&self, user_id: i32, kind: &str) -> Result<(), GenerationError>;
}
