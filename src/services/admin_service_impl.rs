//! `SeaORM` implementation of the `AdminService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::db::{Store, User};
use crate::services::admin_service::{AdminError, AdminService, UserDto};

pub struct SeaOrmAdminService {
    store: Store,
}

impl SeaOrmAdminService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn to_dto(user: User) -> UserDto {
    UserDto {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        approved: user.approved,
        blocked: user.blocked,
        created_at: user.created_at,
    }
}

#[async_trait]
impl AdminService for SeaOrmAdminService {
    async fn list_users(&self) -> Result<Vec<UserDto>, AdminError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(to_dto).collect())
    }

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<UserDto, AdminError> {
        if self.store.get_user_by_email(email).await?.is_some() {
            return Err(AdminError::EmailTaken);
        }

        let user = self
            .store
            .create_user(name, email, password, role, true)
            .await?;

        info!("Admin created user {} ({role})", user.id);
        Ok(to_dto(user))
    }

    async fn delete_user(&self, id: i32) -> Result<(), AdminError> {
        let deleted = self.store.delete_user(id).await?;
        if !deleted {
            return Err(AdminError::NotFound);
        }

        info!("Admin deleted user {id}");
        Ok(())
    }

    async fn approve(&self, id: i32) -> Result<UserDto, AdminError> {
        let user = self
            .store
            .set_user_approved(id, true)
            .await?
            .ok_or(AdminError::NotFound)?;

        Ok(to_dto(user))
    }

    async fn block(&self, id: i32) -> Result<UserDto, AdminError> {
        let user = self
            .store
            .set_user_blocked(id, true)
            .await?
            .ok_or(AdminError::NotFound)?;

        info!("Admin blocked user {id}");
        Ok(to_dto(user))
    }

    async fn unblock(&self, id: i32) -> Result<UserDto, AdminError> {
        let user = self
            .store
            .set_user_blocked(id, false)
            .await?
            .ok_or(AdminError::NotFound)?;

        info!("Admin unblocked user {id}");
        Ok(to_dto(user))
    }
}
