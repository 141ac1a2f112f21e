//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tracing::info;

use crate::clients::Mailer;
use crate::constants::roles;
use crate::db::Store;
use crate::db::repositories::user::generate_reset_token;
use crate::services::auth_service::{AuthError, AuthService, LoginResult, UserSummary};
use crate::services::tokens::TokenService;

pub struct SeaOrmAuthService {
    store: Store,
    tokens: Arc<TokenService>,
    mailer: Arc<Mailer>,
    reset_token_ttl: Duration,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(
        store: Store,
        tokens: Arc<TokenService>,
        mailer: Arc<Mailer>,
        reset_token_ttl_minutes: i64,
    ) -> Self {
        Self {
            store,
            tokens,
            mailer,
            reset_token_ttl: Duration::minutes(reset_token_ttl_minutes),
        }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), AuthError> {
        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        self.store
            .create_user(name, email, password, roles::USER, false)
            .await?;

        info!("Registered new account for {email}, awaiting approval");
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let Some((user, password_hash)) =
            self.store.get_user_by_email_with_password(email).await?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        if !user.approved {
            return Err(AuthError::AwaitingApproval);
        }
        if user.blocked {
            return Err(AuthError::Blocked);
        }

        let is_valid = self.store.verify_password(password, &password_hash).await?;
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(user.id, &user.role)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(LoginResult {
            token,
            user: UserSummary {
                id: user.id,
                name: user.name,
                role: user.role,
            },
        })
    }

    async fn change_password(
        &self,
        user_id: i32,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let Some((user, password_hash)) = self.store.get_user_with_password(user_id).await? else {
            return Err(AuthError::UserNotFound);
        };

        let is_valid = self
            .store
            .verify_password(old_password, &password_hash)
            .await?;
        if !is_valid {
            return Err(AuthError::WrongPassword);
        }

        self.store.update_user_password(user.id, new_password).await?;

        info!("Password changed for user {}", user.id);
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let Some(user) = self.store.get_user_by_email(email).await? else {
            return Err(AuthError::UserNotFound);
        };

        let token = generate_reset_token();
        let expires_at = Utc::now() + self.reset_token_ttl;

        self.store
            .set_reset_token(user.id, &token, expires_at)
            .await?;

        self.mailer
            .send_password_reset(&user.email, &token)
            .await
            .map_err(|e| AuthError::Email(e.to_string()))?;

        Ok(())
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        let consumed = self
            .store
            .reset_password_by_token(token, new_password)
            .await?;

        if !consumed {
            return Err(AuthError::InvalidResetToken);
        }

        Ok(())
    }

    async fn approve(&self, user_id: i32) -> Result<(), AuthError> {
        let updated = self.store.set_user_approved(user_id, true).await?;
        if updated.is_none() {
            return Err(AuthError::UserNotFound);
        }

        info!("User {user_id} approved");
        Ok(())
    }
}
