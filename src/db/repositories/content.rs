use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, ExprTrait, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, Order,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::constants::usage;
use crate::entities::content_records;

/// Input for a new content record
#[derive(Debug, Clone)]
pub struct NewContent {
    pub user_id: i32,
    pub client_id: Option<i32>,
    pub title: String,
    pub keywords: Vec<String>,
    pub length: i32,
    pub content_type: String,
    pub headings: i32,
    pub generated_content: String,
    pub generations: i32,
    pub regenerations: i32,
    pub usage_month: Option<String>,
}

/// Per-day usage totals for the current month
#[derive(Debug, Clone, FromQueryResult)]
pub struct DailyUsageRow {
    pub date: String,
    pub generations: i64,
    pub regenerations: i64,
}

/// Per-user per-month usage totals ("YYYY-MM" bucket)
#[derive(Debug, Clone, FromQueryResult)]
pub struct UserMonthUsageRow {
    pub user_id: i32,
    pub month: String,
    pub total_generations: i64,
    pub total_regenerations: i64,
}

pub struct ContentRepository {
    conn: DatabaseConnection,
}

impl ContentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, content: &NewContent) -> Result<content_records::Model> {
        let keywords =
            serde_json::to_string(&content.keywords).context("Failed to encode keywords")?;

        let active = content_records::ActiveModel {
            user_id: Set(content.user_id),
            client_id: Set(content.client_id),
            title: Set(content.title.clone()),
            keywords: Set(keywords),
            length: Set(content.length),
            content_type: Set(content.content_type.clone()),
            headings: Set(content.headings),
            generated_content: Set(content.generated_content.clone()),
            generations: Set(content.generations),
            regenerations: Set(content.regenerations),
            usage_month: Set(content.usage_month.clone()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert content record")
    }

    pub async fn get(&self, id: i32) -> Result<Option<content_records::Model>> {
        content_records::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query content record")
    }

    pub async fn list_all(&self) -> Result<Vec<content_records::Model>> {
        content_records::Entity::find()
            .order_by_desc(content_records::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list content records")
    }

    /// Replace the generated text in place and bump the regeneration counter
    /// in a single atomic update. Returns false when the id is absent.
    pub async fn record_regeneration(&self, id: i32, generated_content: &str) -> Result<bool> {
        let result = content_records::Entity::update_many()
            .col_expr(
                content_records::Column::GeneratedContent,
                Expr::value(generated_content),
            )
            .col_expr(
                content_records::Column::Regenerations,
                Expr::col(content_records::Column::Regenerations).add(1),
            )
            .filter(content_records::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to record regeneration")?;

        Ok(result.rows_affected > 0)
    }

    /// Increment the monthly usage tally for a user. Update-first; on a miss,
    /// insert the placeholder row. The partial unique index on
    /// (user_id, usage_month) means a concurrent insert loses the race with a
    /// UNIQUE violation, in which case the increment is retried once.
    pub async fn increment_usage(&self, user_id: i32, month: &str, kind: &str) -> Result<()> {
        if self.try_increment_usage(user_id, month, kind).await? {
            return Ok(());
        }

        let placeholder = NewContent {
            user_id,
            client_id: None,
            title: String::new(),
            keywords: Vec::new(),
            length: 0,
            content_type: crate::constants::content_types::BLOG.to_string(),
            headings: 0,
            generated_content: String::new(),
            generations: i32::from(kind == usage::GENERATION),
            regenerations: i32::from(kind == usage::REGENERATION),
            usage_month: Some(month.to_string()),
        };

        match self.insert(&placeholder).await {
            Ok(_) => Ok(()),
            Err(e) if e.to_string().contains("UNIQUE") => {
                // Lost the insert race; the row exists now
                if self.try_increment_usage(user_id, month, kind).await? {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("Usage row vanished after insert conflict"))
                }
            }
            Err(e) => Err(e),
        }
    }

    async fn try_increment_usage(&self, user_id: i32, month: &str, kind: &str) -> Result<bool> {
        let counter = if kind == usage::REGENERATION {
            content_records::Column::Regenerations
        } else {
            content_records::Column::Generations
        };

        let result = content_records::Entity::update_many()
            .col_expr(counter, Expr::col(counter).add(1))
            .filter(content_records::Column::UserId.eq(user_id))
            .filter(content_records::Column::UsageMonth.eq(month))
            .exec(&self.conn)
            .await
            .context("Failed to increment usage counter")?;

        Ok(result.rows_affected > 0)
    }

    /// Sum generation counters per calendar day for records whose created_at
    /// falls inside the given "YYYY-MM" month, ascending by date.
    pub async fn usage_by_day(&self, month: &str) -> Result<Vec<DailyUsageRow>> {
        let date_expr: SimpleExpr = Expr::cust("substr(created_at, 1, 10)").into();

        content_records::Entity::find()
            .select_only()
            .column_as(date_expr.clone(), "date")
            .column_as(content_records::Column::Generations.sum(), "generations")
            .column_as(
                content_records::Column::Regenerations.sum(),
                "regenerations",
            )
            .filter(content_records::Column::CreatedAt.starts_with(month))
            .group_by(date_expr.clone())
            .order_by(date_expr, Order::Asc)
            .into_model::<DailyUsageRow>()
            .all(&self.conn)
            .await
            .context("Failed to aggregate daily usage")
    }

    /// Sum generation counters per (user, "YYYY-MM" month) over all records.
    pub async fn usage_by_user_month(&self) -> Result<Vec<UserMonthUsageRow>> {
        let month_expr: SimpleExpr = Expr::cust("substr(created_at, 1, 7)").into();

        content_records::Entity::find()
            .select_only()
            .column(content_records::Column::UserId)
            .column_as(month_expr.clone(), "month")
            .column_as(
                content_records::Column::Generations.sum(),
                "total_generations",
            )
            .column_as(
                content_records::Column::Regenerations.sum(),
                "total_regenerations",
            )
            .group_by(content_records::Column::UserId)
            .group_by(month_expr)
            .into_model::<UserMonthUsageRow>()
            .all(&self.conn)
            .await
            .context("Failed to aggregate monthly usage")
    }
}
