pub mod auth;
pub use auth::AuthService;
pub mod tenancy_service;
pub use tenancy_service::TenantService;
pub mod post_service;
pub use post_service::PostService;
pub mod search;
pub use search::SearchClient;
