//! Domain service for registration, login, and the password lifecycle.

use serde::Serialize;
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Awaiting admin approval")]
    AwaitingApproval,

    #[error("Your access has been revoked. Please contact admin.")]
    Blocked,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email delivery failed: {0}")]
    Email(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// User summary embedded in the login response.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub role: String,
}

/// Login result: a signed bearer token plus who it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: UserSummary,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates an unapproved account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the email is already registered.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError>;

    /// Verifies credentials and issues a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on unknown email or password
    /// mismatch, [`AuthError::AwaitingApproval`] or [`AuthError::Blocked`]
    /// when the account cannot obtain a session.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Changes a user's password after verifying the old one.
    async fn change_password(
        &self,
        user_id: i32,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Issues a time-bounded reset token and dispatches the reset email.
    async fn forgot_password(&self, email: &str) -> Result<(), AuthError>;

    /// Consumes a reset token and replaces the password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidResetToken`] when the token is unknown,
    /// already used, or expired.
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError>;

    /// Marks an account approved.
    async fn approve(&self, user_id: i32) -> Result<(), AuthError>;
}
