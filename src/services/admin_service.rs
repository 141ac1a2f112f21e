//! Domain service for user moderation. Every operation here is reachable
//! only through super-admin gated routes.

use serde::Serialize;
use thiserror::Error;

/// Errors specific to admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("User not found")]
    NotFound,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AdminError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Full account view for the admin user list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub approved: bool,
    pub blocked: bool,
    pub created_at: String,
}

/// Domain service trait for user management.
#[async_trait::async_trait]
pub trait AdminService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserDto>, AdminError>;

    /// Creates a pre-approved account with an admin-assigned role.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::EmailTaken`] on a duplicate email.
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<UserDto, AdminError>;

    async fn delete_user(&self, id: i32) -> Result<(), AdminError>;

    async fn approve(&self, id: i32) -> Result<UserDto, AdminError>;

    async fn block(&self, id: i32) -> Result<UserDto, AdminError>;

    async fn unblock(&self, id: i32) -> Result<UserDto, AdminError>;
}
