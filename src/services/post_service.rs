// src/services/post_service.rs

use chrono::Utc;
use sqlx::PgPool;

use crate::{
    common::constants::RESERVED_POST_SLUGS,
    common::error::AppError,
    common::tasks::fire_and_forget,
    db::{FeedRepository, PostRepository},
    models::auth::Principal,
    models::content::{NewFeedItem, NewPost, Post},
    models::tenancy::Tenant,
};

pub struct CreatePostInput {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub tags: Vec<String>,
    pub publish: bool,
}

#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    feed_repo: FeedRepository,
}

impl PostService {
    pub fn new(post_repo: PostRepository, feed_repo: FeedRepository) -> Self {
        Self {
            post_repo,
            feed_repo,
        }
    }

    // Cria um post no banco do tenant da requisição. Publicar também
    // sincroniza o índice global — em segundo plano, sem bloquear nem
    // falhar a criação.
    pub async fn create(
        &self,
        pool: &PgPool,
        tenant: &Tenant,
        author: &Principal,
        input: CreatePostInput,
    ) -> Result<Post, AppError> {
        if RESERVED_POST_SLUGS.contains(&input.slug.as_str()) {
            return Err(AppError::SlugReserved);
        }

        let post = self
            .post_repo
            .create(
                pool,
                &NewPost {
                    slug: input.slug,
                    title: input.title,
                    excerpt: input.excerpt,
                    content: input.content,
                    tags: input.tags,
                    author_id: author.id,
                    author_username: author.username.clone(),
                    published_at: input.publish.then(Utc::now),
                },
            )
            .await?;

        if post.published_at.is_some() {
            let feed_repo = self.feed_repo.clone();
            let item = NewFeedItem::from_post(tenant, &post);
            fire_and_forget("sincronização do feed global", async move {
                feed_repo.upsert(&item).await.map(|_| ())
            });
        }

        Ok(post)
    }

    pub async fn find_published(
        &self,
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError> {
        self.post_repo.find_published(pool, limit, offset).await
    }

    pub async fn find_by_slug(&self, pool: &PgPool, slug: &str) -> Result<Post, AppError> {
        self.post_repo
            .find_by_slug(pool, slug)
            .await?
            .ok_or(AppError::PostNotFound)
    }
}
