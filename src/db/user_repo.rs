// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::auth::{UpdateProfilePayload, User};

// O repositório de usuários. Diferente dos repositórios do plano de
// controle, ele não é dono de um pool: a tabela `users` existe em CADA
// banco de tenant (e no banco de controle, como diretório global), então
// toda operação recebe o pool do banco certo de quem chama.
#[derive(Clone)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id(&self, pool: &PgPool, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_email(
        &self,
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn find_by_username(
        &self,
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn create(
        &self,
        pool: &PgPool,
        email: &str,
        username: &str,
        password_hash: &str,
        display_name: &str,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, password_hash, display_name)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    if let Some(constraint) = db_err.constraint() {
                        return match constraint {
                            // Nomes padrão que o Postgres cria para UNIQUE
                            "users_email_key" => AppError::EmailAlreadyExists,
                            "users_username_key" => AppError::UsernameAlreadyExists,
                            _ => AppError::UniqueConstraintViolation(constraint.to_string()),
                        };
                    }
                }
            }
            e.into()
        })
    }

    // Atualização parcial de perfil: campos ausentes ficam como estão.
    pub async fn update_profile(
        &self,
        pool: &PgPool,
        id: Uuid,
        payload: &UpdateProfilePayload,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                display_name = COALESCE($2, display_name),
                avatar = COALESCE($3, avatar),
                bio = COALESCE($4, bio),
                tagline = COALESCE($5, tagline),
                location = COALESCE($6, location),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.display_name)
        .bind(&payload.avatar)
        .bind(&payload.bio)
        .bind(&payload.tagline)
        .bind(&payload.location)
        .fetch_optional(pool)
        .await?;
        Ok(user)
    }
}
