//! `SeaORM` implementation of the `ClientService` trait.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::db::{Store, User};
use crate::entities::client_profiles;
use crate::services::client_service::{
    ClientError, ClientProfileDto, ClientProfileInput, ClientService, UserRef,
};

pub struct SeaOrmClientService {
    store: Store,
}

impl SeaOrmClientService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Resolve provenance ids against the user table. Deleted users simply
    /// drop out of the response.
    async fn to_dtos(
        &self,
        profiles: Vec<client_profiles::Model>,
    ) -> Result<Vec<ClientProfileDto>, ClientError> {
        let users = self.store.list_users().await?;
        let by_id: HashMap<i32, &User> = users.iter().map(|u| (u.id, u)).collect();

        let resolve = |id: i32| -> Option<UserRef> {
            by_id.get(&id).map(|u| UserRef {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
            })
        };

        Ok(profiles
            .into_iter()
            .map(|p| ClientProfileDto {
                id: p.id,
                name: p.name,
                website: p.website,
                prompt: p.prompt,
                created_by: resolve(p.created_by),
                created_at: p.created_at,
                updated_by: resolve(p.updated_by),
                updated_at: p.updated_at,
            })
            .collect())
    }
}

#[async_trait]
impl ClientService for SeaOrmClientService {
    async fn create(
        &self,
        user_id: i32,
        input: ClientProfileInput,
    ) -> Result<ClientProfileDto, ClientError> {
        let profile = self
            .store
            .create_client_profile(&input.name, &input.website, &input.prompt, user_id)
            .await?;

        let mut dtos = self.to_dtos(vec![profile]).await?;
        Ok(dtos.remove(0))
    }

    async fn list(&self) -> Result<Vec<ClientProfileDto>, ClientError> {
        let profiles = self.store.list_client_profiles().await?;
        self.to_dtos(profiles).await
    }

    async fn update(
        &self,
        id: i32,
        user_id: i32,
        input: ClientProfileInput,
    ) -> Result<ClientProfileDto, ClientError> {
        let updated = self
            .store
            .update_client_profile(id, &input.name, &input.website, &input.prompt, user_id)
            .await?
            .ok_or(ClientError::NotFound)?;

        let mut dtos = self.to_dtos(vec![updated]).await?;
        Ok(dtos.remove(0))
    }

    async fn delete(&self, id: i32) -> Result<(), ClientError> {
        let deleted = self.store.delete_client_profile(id).await?;
        if !deleted {
            return Err(ClientError::NotFound);
        }
        Ok(())
    }
}
