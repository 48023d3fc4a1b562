//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::{auth::auth_guard, tenancy::tenant_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Migrações do plano de controle na inicialização. As migrações dos
    // bancos de tenant rodam no provisionamento de cada tenant.
    sqlx::migrate!()
        .run(app_state.registry.control_pool())
        .await
        .expect("Falha ao rodar as migrações do banco de controle.");

    tracing::info!("✅ Migrações do banco de controle executadas com sucesso!");

    // Rotas de autenticação (escopadas por tenant via cabeçalho)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::get_me));

    let tenancy_routes = Router::new()
        .route(
            "/",
            post(handlers::tenancy::create_tenant).get(handlers::tenancy::list_tenants),
        )
        .route("/me", get(handlers::tenancy::list_my_tenants))
        .route("/check-slug", get(handlers::tenancy::check_slug))
        .route(
            "/{slug}",
            get(handlers::tenancy::find_by_slug)
                .put(handlers::tenancy::update_tenant)
                .delete(handlers::tenancy::delete_tenant),
        );

    let user_routes = Router::new().route("/me", put(handlers::users::update_me));

    let post_routes = Router::new()
        .route(
            "/",
            post(handlers::posts::create_post).get(handlers::posts::list_posts),
        )
        .route("/{slug}", get(handlers::posts::get_post));

    let feed_routes = Router::new()
        .route("/", get(handlers::feed::global_feed))
        .route("/search", get(handlers::feed::search));

    // Combina tudo no router principal. Os guards são camadas globais:
    // o tenant_guard roda primeiro (camada mais externa) e o auth_guard
    // depois — a resolução de identidade depende do tenant contextual.
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/tenants", tenancy_routes)
        .nest("/api/users", user_routes)
        .nest("/api/posts", post_routes)
        .nest("/api/feed", feed_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ))
        .with_state(app_state.clone());

    // Inicia o servidor
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(4000);
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Falha ao instalar o handler de Ctrl+C");
        })
        .await
        .expect("Erro no servidor Axum");

    // Fecha o pool de controle e todos os pools de tenant cacheados.
    app_state.registry.shutdown().await;
}
