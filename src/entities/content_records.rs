use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    /// Null on the monthly usage placeholder rows.
    pub client_id: Option<i32>,

    pub title: String,

    /// JSON array of keyword strings.
    pub keywords: String,

    /// Target length in words.
    pub length: i32,

    /// "blog" or "website"
    pub content_type: String,

    pub headings: i32,

    pub generated_content: String,

    pub generations: i32,

    pub regenerations: i32,

    /// "YYYY-MM" bucket, set only on usage placeholder rows. A partial
    /// unique index on (user_id, usage_month) keeps one row per user per month.
    pub usage_month: Option<String>,

    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
