//! Implementation of the `GenerationService` trait backed by the store and
//! the chat-completion client.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::clients::OpenAiClient;
use crate::constants::usage;
use crate::db::{NewContent, Store};
use crate::entities::{client_profiles, content_records};
use crate::services::generation_service::{
    ContentDto, GenerationError, GenerationRequest, GenerationService,
};

pub struct SeaOrmGenerationService {
    store: Store,
    openai: Arc<OpenAiClient>,
}

impl SeaOrmGenerationService {
    #[must_use]
    pub const fn new(store: Store, openai: Arc<OpenAiClient>) -> Self {
        Self { store, openai }
    }
}

/// The prompt layout the downstream model is tuned against. Regeneration must
/// produce the identical prompt from stored fields.
fn build_prompt(client: &client_profiles::Model, request: &GenerationRequest) -> String {
    format!(
        "Client: {}\nWebsite: {}\nNature: {}\nTitle: {}\nKeywords: {}\nLength: {} words\nType: {}\nHeadings: {}\nGenerate unique SEO content.",
        client.name,
        client.website,
        client.prompt,
        request.title,
        request.keywords.join(", "),
        request.length,
        request.content_type,
        request.headings,
    )
}

fn decode_keywords(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn to_dto(model: content_records::Model) -> ContentDto {
    ContentDto {
        id: model.id,
        user_id: model.user_id,
        client_id: model.client_id,
        title: model.title,
        keywords: decode_keywords(&model.keywords),
        length: model.length,
        content_type: model.content_type,
        headings: model.headings,
        generated_content: model.generated_content,
        generations: model.generations,
        regenerations: model.regenerations,
        created_at: model.created_at,
    }
}

#[async_trait]
impl GenerationService for SeaOrmGenerationService {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let client = self
            .store
            .get_client_profile(request.client_id)
            .await?
            .ok_or(GenerationError::ClientNotFound)?;

        let prompt = build_prompt(&client, request);

        self.openai
            .chat_completion(&prompt)
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))
    }

    async fn save(
        &self,
        user_id: i32,
        request: &GenerationRequest,
        generated_content: String,
    ) -> Result<ContentDto, GenerationError> {
        let record = NewContent {
            user_id,
            client_id: Some(request.client_id),
            title: request.title.clone(),
            keywords: request.keywords.clone(),
            length: request.length,
            content_type: request.content_type.clone(),
            headings: request.headings,
            generated_content,
            generations: 1,
            regenerations: 0,
            usage_month: None,
        };

        let model = self.store.insert_content(&record).await?;
        Ok(to_dto(model))
    }

    async fn regenerate(&self, content_id: i32) -> Result<String, GenerationError> {
        let content = self
            .store
            .get_content(content_id)
            .await?
            .ok_or(GenerationError::ContentNotFound)?;

        let client_id = content.client_id.ok_or(GenerationError::ClientNotFound)?;
        let client = self
            .store
            .get_client_profile(client_id)
            .await?
            .ok_or(GenerationError::ClientNotFound)?;

        let request = GenerationRequest {
            client_id,
            title: content.title.clone(),
            keywords: decode_keywords(&content.keywords),
            length: content.length,
            content_type: content.content_type.clone(),
            headings: content.headings,
        };
        let prompt = build_prompt(&client, &request);

        let generated_content = self
            .openai
            .chat_completion(&prompt)
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        let updated = self
            .store
            .record_regeneration(content_id, &generated_content)
            .await?;
        if !updated {
            return Err(GenerationError::ContentNotFound);
        }

        info!("Regenerated content {content_id}");
        Ok(generated_content)
    }

    async fn track_usage(&self, user_id: i32, kind: &str) -> Result<(), GenerationError> {
        if kind != usage::GENERATION && kind != usage::REGENERATION {
            return Err(GenerationError::InvalidUsageType);
        }

        let month = chrono::Utc::now().format("%Y-%m").to_string();
        self.store.increment_usage(user_id, &month, kind).await?;

        Ok(())
    }
}
