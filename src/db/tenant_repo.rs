// src/db/tenant_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::common::error::AppError;
use crate::models::tenancy::{NewTenant, Tenant};

// O diretório de tenants: CRUD puro sobre a tabela `tenants` no banco de
// controle. Nenhuma regra de negócio aqui — isso é papel do serviço de
// ciclo de vida.
#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, tenant: &NewTenant) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants
                (id, slug, theme, name, description, logo,
                 owner_user_id, owner_username, database_name, status, plan)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'active', 'free')
            RETURNING *
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.slug)
        .bind(&tenant.theme)
        .bind(&tenant.name)
        .bind(&tenant.description)
        .bind(&tenant.logo)
        .bind(tenant.owner_user_id)
        .bind(&tenant.owner_username)
        .bind(&tenant.database_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Corrida entre o check de slug do serviço e o INSERT: a chave
            // única é quem decide.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::SlugTaken;
                }
            }
            e.into()
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(tenant)
    }

    pub async fn find_by_owner(&self, owner_user_id: Uuid) -> Result<Vec<Tenant>, AppError> {
        let tenants = sqlx::query_as::<_, Tenant>(
            "SELECT * FROM tenants WHERE owner_user_id = $1 ORDER BY created_at",
        )
        .bind(owner_user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tenants)
    }

    pub async fn find_by_owner_username(
        &self,
        owner_username: &str,
    ) -> Result<Option<Tenant>, AppError> {
        let tenant =
            sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE owner_username = $1")
                .bind(owner_username)
                .fetch_optional(&self.pool)
                .await?;
        Ok(tenant)
    }

    pub async fn find_all(&self) -> Result<Vec<Tenant>, AppError> {
        let tenants = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;
        Ok(tenants)
    }

    // Atualização parcial: campos ausentes ficam como estão.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        theme: Option<&str>,
        logo: Option<&str>,
    ) -> Result<Option<Tenant>, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                theme = COALESCE($4, theme),
                logo = COALESCE($5, logo),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(theme)
        .bind(logo)
        .fetch_optional(&self.pool)
        .await?;
        Ok(tenant)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
