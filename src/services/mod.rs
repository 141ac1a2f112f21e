pub mod tokens;
pub use tokens::{Claims, TokenService};

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, UserSummary};
pub use auth_service_impl::SeaOrmAuthService;

pub mod client_service;
pub mod client_service_impl;
pub use client_service::{ClientError, ClientProfileDto, ClientProfileInput, ClientService, UserRef};
pub use client_service_impl::SeaOrmClientService;

pub mod generation_service;
pub mod generation_service_impl;
pub use generation_service::{ContentDto, GenerationError, GenerationRequest, GenerationService};
pub use generation_service_impl::SeaOrmGenerationService;

pub mod analytics_service;
pub mod analytics_service_impl;
pub use analytics_service::{
    AnalyticsError, AnalyticsService, ContentLogDto, DailyUsage, UserMonthlyUsage,
};
pub use analytics_service_impl::SeaOrmAnalyticsService;

pub mod admin_service;
pub mod admin_service_impl;
pub use admin_service::{AdminError, AdminService, UserDto};
pub use admin_service_impl::SeaOrmAdminService;
