use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::client_profiles;

pub struct ClientProfileRepository {
    conn: DatabaseConnection,
}

impl ClientProfileRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        name: &str,
        website: &str,
        prompt: &str,
        created_by: i32,
    ) -> Result<client_profiles::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = client_profiles::ActiveModel {
            name: Set(name.to_string()),
            website: Set(website.to_string()),
            prompt: Set(prompt.to_string()),
            created_by: Set(created_by),
            created_at: Set(now.clone()),
            updated_by: Set(created_by),
            updated_at: Set(now),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert client profile")
    }

    pub async fn get(&self, id: i32) -> Result<Option<client_profiles::Model>> {
        client_profiles::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query client profile")
    }

    pub async fn list(&self) -> Result<Vec<client_profiles::Model>> {
        client_profiles::Entity::find()
            .order_by_asc(client_profiles::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list client profiles")
    }

    /// Update a profile, stamping the updater and refreshing the timestamp.
    /// Returns None when the id is absent.
    pub async fn update(
        &self,
        id: i32,
        name: &str,
        website: &str,
        prompt: &str,
        updated_by: i32,
    ) -> Result<Option<client_profiles::Model>> {
        let Some(profile) = client_profiles::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: client_profiles::ActiveModel = profile.into();
        active.name = Set(name.to_string());
        active.website = Set(website.to_string());
        active.prompt = Set(prompt.to_string());
        active.updated_by = Set(updated_by);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active.update(&self.conn).await?;
        Ok(Some(model))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = client_profiles::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete client profile")?;

        Ok(result.rows_affected > 0)
    }
}
