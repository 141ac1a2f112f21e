use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::SharedState;

pub mod auth;
pub mod clients;
pub mod content;
mod error;
mod types;
pub mod users;
mod validation;

pub use error::ApiError;
pub use types::{ApiResponse, MessageResponse};

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<Config> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn tokens(&self) -> &Arc<crate::services::TokenService> {
        &self.shared.tokens
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn crate::services::AuthService> {
        &self.shared.auth_service
    }

    #[must_use]
    pub fn client_service(&self) -> &Arc<dyn crate::services::ClientService> {
        &self.shared.client_service
    }

    #[must_use]
    pub fn generation_service(&self) -> &Arc<dyn crate::services::GenerationService> {
        &self.shared.generation_service
    }

    #[must_use]
    pub fn analytics_service(&self) -> &Arc<dyn crate::services::AnalyticsService> {
        &self.shared.analytics_service
    }

    #[must_use]
    pub fn admin_service(&self) -> &Arc<dyn crate::services::AdminService> {
        &self.shared.admin_service
    }
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(Arc::new(AppState { shared }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let protected_routes = create_protected_router(state.clone());

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/approve", post(auth::approve))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password/{token}", post(auth::reset_password))
        // Secondary auth surface kept for existing clients; same handlers.
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login))
        .with_state(state.clone());

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/", get(root))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_protected_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/change-password", post(auth::change_password))
        .route("/clients", post(clients::create_client))
        .route("/clients", get(clients::list_clients))
        .route("/clients/{id}", put(clients::update_client))
        .route("/clients/{id}", delete(clients::delete_client))
        .route("/content/generate", post(content::generate))
        .route("/content/save", post(content::save))
        .route("/content/regenerate", post(content::regenerate))
        .route("/content/track-usage", post(content::track_usage))
        .route("/content/logs", get(content::logs))
        .route("/content/usage", get(content::usage))
        .route("/users", get(users::list_users))
        .route("/users", post(users::create_user))
        .route("/users/{id}", delete(users::delete_user))
        .route("/users/{id}/approve", post(users::approve_user))
        .route("/users/{id}/block", post(users::block_user))
        .route("/users/{id}/unblock", post(users::unblock_user))
        .route_layer(middleware::from_fn_with_state(state, auth::require_auth))
}

async fn root() -> &'static str {
    "ContentForge API running"
}
