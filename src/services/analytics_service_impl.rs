//! `SeaORM` implementation of the `AnalyticsService` trait.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::db::{Store, User};
use crate::services::analytics_service::{
    AnalyticsError, AnalyticsService, ClientRef, ContentLogDto, DailyUsage, UserMonthlyUsage,
};
use crate::services::client_service::UserRef;

pub struct SeaOrmAnalyticsService {
    store: Store,
}

impl SeaOrmAnalyticsService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Split a "YYYY-MM" bucket into calendar year and month.
fn split_month_bucket(bucket: &str) -> Option<(i32, u32)> {
    let (year, month) = bucket.split_once('-')?;
    Some((year.parse().ok()?, month.parse().ok()?))
}

#[async_trait]
impl AnalyticsService for SeaOrmAnalyticsService {
    async fn logs(&self) -> Result<Vec<ContentLogDto>, AnalyticsError> {
        let records = self.store.list_content().await?;
        let users = self.store.list_users().await?;
        let clients = self.store.list_client_profiles().await?;

        let users_by_id: HashMap<i32, &User> = users.iter().map(|u| (u.id, u)).collect();
        let clients_by_id: HashMap<i32, _> = clients.iter().map(|c| (c.id, c)).collect();

        Ok(records
            .into_iter()
            .map(|r| ContentLogDto {
                id: r.id,
                user: users_by_id.get(&r.user_id).map(|u| UserRef {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                }),
                client: r
                    .client_id
                    .and_then(|id| clients_by_id.get(&id))
                    .map(|c| ClientRef {
                        id: c.id,
                        name: c.name.clone(),
                        website: c.website.clone(),
                    }),
                title: r.title,
                keywords: serde_json::from_str(&r.keywords).unwrap_or_default(),
                length: r.length,
                content_type: r.content_type,
                headings: r.headings,
                generated_content: r.generated_content,
                generations: r.generations,
                regenerations: r.regenerations,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn usage_by_day(&self) -> Result<Vec<DailyUsage>, AnalyticsError> {
        let month = chrono::Utc::now().format("%Y-%m").to_string();
        let rows = self.store.usage_by_day(&month).await?;

        Ok(rows
            .into_iter()
            .map(|r| DailyUsage {
                date: r.date,
                generations: r.generations,
                regenerations: r.regenerations,
            })
            .collect())
    }

    async fn usage_by_user(&self) -> Result<Vec<UserMonthlyUsage>, AnalyticsError> {
        let rows = self.store.usage_by_user_month().await?;
        let users = self.store.list_users().await?;
        let users_by_id: HashMap<i32, &User> = users.iter().map(|u| (u.id, u)).collect();

        let mut usage: Vec<UserMonthlyUsage> = rows
            .into_iter()
            .filter_map(|r| {
                let (year, month) = split_month_bucket(&r.month)?;
                let (name, email) = users_by_id
                    .get(&r.user_id)
                    .map_or((String::new(), String::new()), |u| {
                        (u.name.clone(), u.email.clone())
                    });

                Some(UserMonthlyUsage {
                    user: name,
                    email,
                    total_generations: r.total_generations,
                    total_regenerations: r.total_regenerations,
                    month,
                    year,
                })
            })
            .collect();

        usage.sort_by(|a, b| {
            b.year
                .cmp(&a.year)
                .then(b.month.cmp(&a.month))
                .then(a.user.cmp(&b.user))
        });

        Ok(usage)
    }
}
