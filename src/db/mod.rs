use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{client_profiles, content_records};

pub mod migrator;
pub mod repositories;

pub use repositories::content::{DailyUsageRow, NewContent, UserMonthUsageRow};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn client_repo(&self) -> repositories::client_profile::ClientProfileRepository {
        repositories::client_profile::ClientProfileRepository::new(self.conn.clone())
    }

    fn content_repo(&self) -> repositories::content::ContentRepository {
        repositories::content::ContentRepository::new(self.conn.clone())
    }

    // ---- users -------------------------------------------------------------

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_email_with_password(
        &self,
        email: &str,
    ) -> Result<Option<(User, String)>> {
        self.user_repo().get_by_email_with_password(email).await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_with_password(&self, id: i32) -> Result<Option<(User, String)>> {
        self.user_repo().get_by_id_with_password(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
        approved: bool,
    ) -> Result<User> {
        self.user_repo()
            .create(name, email, password, role, approved)
            .await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn set_user_approved(&self, id: i32, approved: bool) -> Result<Option<User>> {
        self.user_repo().set_approved(id, approved).await
    }

    pub async fn set_user_blocked(&self, id: i32, blocked: bool) -> Result<Option<User>> {
        self.user_repo().set_blocked(id, blocked).await
    }

    pub async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        self.user_repo()
            .verify_password(password, password_hash)
            .await
    }

    pub async fn update_user_password(&self, id: i32, new_password: &str) -> Result<()> {
        self.user_repo().update_password(id, new_password).await
    }

    pub async fn set_reset_token(
        &self,
        id: i32,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        self.user_repo().set_reset_token(id, token, expires_at).await
    }

    pub async fn reset_password_by_token(&self, token: &str, new_password: &str) -> Result<bool> {
        self.user_repo()
            .reset_password_by_token(token, new_password)
            .await
    }

    // ---- client profiles ---------------------------------------------------

    pub async fn create_client_profile(
        &self,
        name: &str,
        website: &str,
        prompt: &str,
        created_by: i32,
    ) -> Result<client_profiles::Model> {
        self.client_repo()
            .create(name, website, prompt, created_by)
            .await
    }

    pub async fn get_client_profile(&self, id: i32) -> Result<Option<client_profiles::Model>> {
        self.client_repo().get(id).await
    }

    pub async fn list_client_profiles(&self) -> Result<Vec<client_profiles::Model>> {
        self.client_repo().list().await
    }

    pub async fn update_client_profile(
        &self,
        id: i32,
        name: &str,
        website: &str,
        prompt: &str,
        updated_by: i32,
    ) -> Result<Option<client_profiles::Model>> {
        self.client_repo()
            .update(id, name, website, prompt, updated_by)
            .await
    }

    pub async fn delete_client_profile(&self, id: i32) -> Result<bool> {
        self.client_repo().delete(id).await
    }

    // ---- content records ---------------------------------------------------

    pub async fn insert_content(&self, content: &NewContent) -> Result<content_records::Model> {
        self.content_repo().insert(content).await
    }

    pub async fn get_content(&self, id: i32) -> Result<Option<content_records::Model>> {
        self.content_repo().get(id).await
    }

    pub async fn list_content(&self) -> Result<Vec<content_records::Model>> {
        self.content_repo().list_all().await
    }

    pub async fn record_regeneration(&self, id: i32, generated_content: &str) -> Result<bool> {
        self.content_repo()
            .record_regeneration(id, generated_content)
            .await
    }

    pub async fn increment_usage(&self, user_id: i32, month: &str, kind: &str) -> Result<()> {
        self.content_repo()
            .increment_usage(user_id, month, kind)
            .await
    }

    pub async fn usage_by_day(&self, month: &str) -> Result<Vec<DailyUsageRow>> {
        self.content_repo().usage_by_day(month).await
    }

    pub async fn usage_by_user_month(&self) -> Result<Vec<UserMonthUsageRow>> {
        self.content_repo().usage_by_user_month().await
    }
}
