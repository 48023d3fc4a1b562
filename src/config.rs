// src/config.rs

use std::{env, sync::Arc};

use crate::{
    db::{ConnectionRegistry, FeedRepository, PostRepository, TenantRepository, UserRepository},
    services::{AuthService, PostService, SearchClient, TenantService},
};

#[derive(Clone)]
pub struct AppState {
    // O registro é o único dono de conexões; todo mundo recebe uma
    // referência a ele por injeção, nunca por global.
    pub registry: Arc<ConnectionRegistry>,
    pub user_repo: UserRepository,
    pub feed_repo: FeedRepository,
    pub auth_service: AuthService,
    pub tenant_service: TenantService,
    pub post_service: PostService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        // O prefixo é efetivamente imutável depois que existem tenants:
        // trocá-lo deixa órfãos todos os bancos já provisionados.
        let tenant_db_prefix =
            env::var("TENANT_DB_PREFIX").unwrap_or_else(|_| "blog_tenant_".to_string());
        let access_expiry_hours = env::var("JWT_ACCESS_EXPIRY_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(2);
        let search_ingest_url = env::var("SEARCH_INGEST_URL").ok();

        // Conecta ao banco de controle; se falhar, a aplicação não sobe.
        let registry =
            Arc::new(ConnectionRegistry::connect(&database_url, tenant_db_prefix).await?);

        // --- Monta o gráfico de dependências ---
        let tenant_repo = TenantRepository::new(registry.control_pool().clone());
        let feed_repo = FeedRepository::new(registry.control_pool().clone());
        let user_repo = UserRepository::new();
        let post_repo = PostRepository::new();
        let search = SearchClient::new(search_ingest_url)?;

        let auth_service = AuthService::new(
            Arc::clone(&registry),
            user_repo.clone(),
            jwt_secret,
            access_expiry_hours,
        );
        let tenant_service = TenantService::new(
            Arc::clone(&registry),
            tenant_repo,
            user_repo.clone(),
            feed_repo.clone(),
            search,
        );
        let post_service = PostService::new(post_repo, feed_repo.clone());

        Ok(Self {
            registry,
            user_repo,
            feed_repo,
            auth_service,
            tenant_service,
            post_service,
        })
    }
}
