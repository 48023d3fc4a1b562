// src/models/content.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::tenancy::Tenant;

// Post dentro do banco de um tenant
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub author_username: String,
    pub likes_count: i64,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub author_id: Uuid,
    pub author_username: String,
    pub published_at: Option<DateTime<Utc>>,
}

// Entrada do índice agregado global (feed cross-tenant, plano de controle).
// Uma linha por (tenant, post) publicado.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub tenant_slug: String,
    pub post_id: Uuid,
    pub post_slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub author_username: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedItem {
    pub tenant_id: Uuid,
    pub tenant_slug: String,
    pub post_id: Uuid,
    pub post_slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub author_username: String,
    pub published_at: DateTime<Utc>,
}

impl NewFeedItem {
    pub fn from_post(tenant: &Tenant, post: &Post) -> Self {
        Self {
            tenant_id: tenant.id,
            tenant_slug: tenant.slug.clone(),
            post_id: post.id,
            post_slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
            author_username: post.author_username.clone(),
            published_at: post.published_at.unwrap_or_else(Utc::now),
        }
    }
}

// Parâmetros de paginação das listagens
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}
