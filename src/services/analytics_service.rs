//! Domain service for usage analytics over persisted content records.

use serde::Serialize;
use thiserror::Error;

use crate::services::client_service::UserRef;

/// Errors specific to analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AnalyticsError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Minimal client identity attached to content log entries.
#[derive(Debug, Clone, Serialize)]
pub struct ClientRef {
    pub id: i32,
    pub name: String,
    pub website: String,
}

/// A content record with user and client identity resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLogDto {
    pub id: i32,
    pub user: Option<UserRef>,
    pub client: Option<ClientRef>,
    pub title: String,
    pub keywords: Vec<String>,
    pub length: i32,
    #[serde(rename = "type")]
    pub content_type: String,
    pub headings: i32,
    pub generated_content: String,
    pub generations: i32,
    pub regenerations: i32,
    pub created_at: String,
}

/// One calendar day of the current month.
#[derive(Debug, Clone, Serialize)]
pub struct DailyUsage {
    pub date: String,
    pub generations: i64,
    pub regenerations: i64,
}

/// Totals for one user in one calendar month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMonthlyUsage {
    pub user: String,
    pub email: String,
    pub total_generations: i64,
    pub total_regenerations: i64,
    pub month: u32,
    pub year: i32,
}

/// Domain service trait for analytics. Role gating happens at the API layer.
#[async_trait::async_trait]
pub trait AnalyticsService: Send + Sync {
    /// All content records, newest first, with identities resolved.
    async fn logs(&self) -> Result<Vec<ContentLogDto>, AnalyticsError>;

    /// Current-month usage grouped by calendar day, ascending.
    async fn usage_by_day(&self) -> Result<Vec<DailyUsage>, AnalyticsError>;

    /// All-time usage grouped by (user, month, year), sorted year desc,
    /// month desc, user name asc.
    async fn usage_by_user(&self) -> Result<Vec<UserMonthlyUsage>, AnalyticsError>;
}
