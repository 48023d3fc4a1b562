// src/db/post_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;
use crate::models::content::{NewPost, Post};

// Posts vivem no banco do tenant; o pool vem de quem chama, igual ao
// repositório de usuários.
#[derive(Clone)]
pub struct PostRepository;

impl PostRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(&self, pool: &PgPool, post: &NewPost) -> Result<Post, AppError> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts
                (slug, title, excerpt, content, tags,
                 author_id, author_username, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&post.slug)
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(&post.tags)
        .bind(post.author_id)
        .bind(&post.author_username)
        .bind(post.published_at)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::SlugTaken;
                }
            }
            e.into()
        })
    }

    pub async fn find_by_slug(&self, pool: &PgPool, slug: &str) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE slug = $1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    // Lista apenas posts publicados, do mais recente para o mais antigo.
    pub async fn find_published(
        &self,
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE published_at IS NOT NULL
            ORDER BY published_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }
}
