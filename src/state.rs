use std::sync::Arc;

use crate::clients::{Mailer, OpenAiClient};
use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AdminService, AnalyticsService, AuthService, ClientService, GenerationService,
    SeaOrmAdminService, SeaOrmAnalyticsService, SeaOrmAuthService, SeaOrmClientService,
    SeaOrmGenerationService, TokenService,
};

/// Everything a request handler can reach: config, the store, the outbound
/// clients, and the domain services. Built once at startup; services receive
/// their dependencies here rather than constructing them per request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub tokens: Arc<TokenService>,

    pub openai: Arc<OpenAiClient>,

    pub mailer: Arc<Mailer>,

    pub auth_service: Arc<dyn AuthService>,

    pub client_service: Arc<dyn ClientService>,

    pub generation_service: Arc<dyn GenerationService>,

    pub analytics_service: Arc<dyn AnalyticsService>,

    pub admin_service: Arc<dyn AdminService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let tokens = Arc::new(TokenService::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.token_ttl_hours,
        ));
        let openai = Arc::new(OpenAiClient::new(&config.openai));
        let mailer = Arc::new(Mailer::new(&config.smtp)?);

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            tokens.clone(),
            mailer.clone(),
            config.auth.reset_token_ttl_minutes,
        )) as Arc<dyn AuthService>;

        let client_service =
            Arc::new(SeaOrmClientService::new(store.clone())) as Arc<dyn ClientService>;

        let generation_service = Arc::new(SeaOrmGenerationService::new(
            store.clone(),
            openai.clone(),
        )) as Arc<dyn GenerationService>;

        let analytics_service =
            Arc::new(SeaOrmAnalyticsService::new(store.clone())) as Arc<dyn AnalyticsService>;

        let admin_service =
            Arc::new(SeaOrmAdminService::new(store.clone())) as Arc<dyn AdminService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            tokens,
            openai,
            mailer,
            auth_service,
            client_service,
            generation_service,
            analytics_service,
            admin_service,
        })
    }
}
