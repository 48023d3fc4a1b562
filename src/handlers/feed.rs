// src/handlers/feed.rs

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::json;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::content::{FeedItem, FeedQuery, SearchQuery},
};

// Feed global: agrega posts publicados de todos os tenants, direto do
// índice no banco de controle — nenhuma conexão de tenant envolvida.
pub async fn global_feed(
    State(app_state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<FeedItem>>, AppError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let items = app_state
        .feed_repo
        .find_all(limit, offset, query.tag.as_deref())
        .await?;

    Ok(Json(items))
}

// Busca sobre o índice global; com o cabeçalho de tenant presente, o
// resultado fica restrito àquele blog.
pub async fn search(
    State(app_state): State<AppState>,
    ctx: Option<TenantContext>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Some(q) = query.q.filter(|q| !q.is_empty()) else {
        return Ok(Json(json!({ "results": { "posts": [] } })));
    };

    let tenant_id = ctx.map(|ctx| ctx.tenant.id);
    let posts = app_state.feed_repo.search(&q, tenant_id).await?;

    Ok(Json(json!({ "results": { "posts": posts } })))
}
