use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// "user" or "superadmin"
    pub role: String,

    /// Accounts start unapproved and cannot log in until an admin approves them.
    pub approved: bool,

    pub blocked: bool,

    /// Opaque password-reset token (64-char hex), cleared on successful reset.
    pub reset_token: Option<String>,

    /// RFC 3339 expiry for the reset token.
    pub reset_token_expires: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
