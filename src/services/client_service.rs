//! Domain service for client profile management.

use serde::Serialize;
use thiserror::Error;

/// Errors specific to client profile operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Client not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for ClientError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Minimal user identity attached to provenance fields.
#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Client profile DTO with creator/updater identity resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfileDto {
    pub id: i32,
    pub name: String,
    pub website: String,
    pub prompt: String,
    pub created_by: Option<UserRef>,
    pub created_at: String,
    pub updated_by: Option<UserRef>,
    pub updated_at: String,
}

/// Fields accepted on create and update.
#[derive(Debug, Clone)]
pub struct ClientProfileInput {
    pub name: String,
    pub website: String,
    pub prompt: String,
}

/// Domain service trait for client profiles.
#[async_trait::async_trait]
pub trait ClientService: Send + Sync {
    /// Creates a profile, stamping the caller as creator and updater.
    async fn create(
        &self,
        user_id: i32,
        input: ClientProfileInput,
    ) -> Result<ClientProfileDto, ClientError>;

    /// Lists all profiles with provenance identity resolved.
    async fn list(&self) -> Result<Vec<ClientProfileDto>, ClientError>;

    /// Updates a profile, stamping the caller as updater.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the id is absent.
    async fn update(
        &self,
        id: i32,
        user_id: i32,
        input: ClientProfileInput,
    ) -> Result<ClientProfileDto, ClientError>;

    /// Deletes a profile.
    async fn delete(&self, id: i32) -> Result<(), ClientError>;
}
