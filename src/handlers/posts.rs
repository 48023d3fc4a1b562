// src/handlers/posts.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::CurrentUser, tenancy::TenantContext},
    models::content::{FeedQuery, Post},
    models::tenancy::validate_slug_charset,
    services::post_service::CreatePostInput,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostPayload {
    #[validate(
        length(min = 1, max = 120, message = "O slug é obrigatório."),
        custom(function = validate_slug_charset)
    )]
    pub slug: String,
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    pub excerpt: Option<String>,
    #[validate(length(min = 1, message = "O conteúdo é obrigatório."))]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub publish: bool,
}

pub async fn create_post(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    CurrentUser(principal): CurrentUser,
    Json(payload): Json<CreatePostPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let post = app_state
        .post_service
        .create(
            &ctx.pool,
            &ctx.tenant,
            &principal,
            CreatePostInput {
                slug: payload.slug,
                title: payload.title,
                excerpt: payload.excerpt,
                content: payload.content,
                tags: payload.tags,
                publish: payload.publish,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn list_posts(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<Post>>, AppError> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);

    let posts = app_state
        .post_service
        .find_published(&ctx.pool, limit, offset)
        .await?;

    Ok(Json(posts))
}

pub async fn get_post(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    Path(slug): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = app_state.post_service.find_by_slug(&ctx.pool, &slug).await?;
    Ok(Json(post))
}
