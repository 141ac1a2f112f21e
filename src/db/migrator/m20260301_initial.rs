use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// One usage placeholder row per user per calendar month. The WHERE clause
/// keeps ordinary content rows (usage_month IS NULL) out of the constraint.
const USAGE_BUCKET_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS idx_content_usage_bucket \
     ON content_records (user_id, usage_month) WHERE usage_month IS NOT NULL";

/// Hash the seed admin password using Argon2id
fn hash_seed_password() -> String {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let password = b"admin";
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password, &salt)
        .expect("Failed to hash seed password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(ClientProfiles)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(ContentRecords)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(USAGE_BUCKET_INDEX)
            .await?;

        // Seed an approved super admin so a fresh deployment is usable
        let now = chrono::Utc::now().to_rfc3339();
        let password_hash = hash_seed_password();

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Users)
            .columns([
                crate::entities::users::Column::Name,
                crate::entities::users::Column::Email,
                crate::entities::users::Column::PasswordHash,
                crate::entities::users::Column::Role,
                crate::entities::users::Column::Approved,
                crate::entities::users::Column::Blocked,
                crate::entities::users::Column::CreatedAt,
            ])
            .values_panic([
                "Super Admin".into(),
                "admin@test.com".into(),
                password_hash.into(),
                crate::constants::roles::SUPER_ADMIN.into(),
                true.into(),
                false.into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentRecords).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClientProfiles).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;

        Ok(())
    }
}
