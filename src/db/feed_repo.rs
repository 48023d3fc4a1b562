// src/db/feed_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::content::{FeedItem, NewFeedItem};

// O índice agregado global vive no banco de controle, endereçado SEM
// passar por conexão de tenant. Derrubar o banco de um tenant não limpa
// estas linhas — a exclusão de tenant chama `delete_by_tenant` explícito.
#[derive(Clone)]
pub struct FeedRepository {
    pool: PgPool,
}

impl FeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Upsert com chave (tenant, post): republicar um post só atualiza a
    // linha existente.
    pub async fn upsert(&self, item: &NewFeedItem) -> Result<FeedItem, AppError> {
        let item = sqlx::query_as::<_, FeedItem>(
            r#"
            INSERT INTO feed_items
                (tenant_id, tenant_slug, post_id, post_slug, title,
                 excerpt, tags, author_username, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (tenant_id, post_id) DO UPDATE SET
                tenant_slug = EXCLUDED.tenant_slug,
                post_slug = EXCLUDED.post_slug,
                title = EXCLUDED.title,
                excerpt = EXCLUDED.excerpt,
                tags = EXCLUDED.tags,
                author_username = EXCLUDED.author_username,
                published_at = EXCLUDED.published_at
            RETURNING *
            "#,
        )
        .bind(item.tenant_id)
        .bind(&item.tenant_slug)
        .bind(item.post_id)
        .bind(&item.post_slug)
        .bind(&item.title)
        .bind(&item.excerpt)
        .bind(&item.tags)
        .bind(&item.author_username)
        .bind(item.published_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    // Purge usado pela exclusão de tenant.
    pub async fn delete_by_tenant(&self, tenant_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM feed_items WHERE tenant_id = $1")
            .bind(tenant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn find_all(
        &self,
        limit: i64,
        offset: i64,
        tag: Option<&str>,
    ) -> Result<Vec<FeedItem>, AppError> {
        let items = sqlx::query_as::<_, FeedItem>(
            r#"
            SELECT * FROM feed_items
            WHERE $3::text IS NULL OR $3 = ANY(tags)
            ORDER BY published_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .bind(tag)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    // Busca simples por substring; escopada por tenant quando informado.
    pub async fn search(
        &self,
        query: &str,
        tenant_id: Option<Uuid>,
    ) -> Result<Vec<FeedItem>, AppError> {
        let pattern = format!("%{}%", query);
        let items = sqlx::query_as::<_, FeedItem>(
            r#"
            SELECT * FROM feed_items
            WHERE (title ILIKE $1 OR excerpt ILIKE $1 OR author_username ILIKE $1)
              AND ($2::uuid IS NULL OR tenant_id = $2)
            ORDER BY published_at DESC
            LIMIT 20
            "#,
        )
        .bind(&pattern)
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
