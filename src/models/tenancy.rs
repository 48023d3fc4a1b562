// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationError;

// ---
// 1. Tenant (o "Blog")
// ---
// O registro do diretório no plano de controle. O banco de dados do tenant
// em si vive fora desta linha; `database_name` é derivado do id na criação
// e nunca muda depois.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub slug: String,
    pub custom_domain: Option<String>,
    pub custom_domain_verified: bool,
    pub theme: String,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub owner_user_id: Uuid,
    pub owner_username: String,
    pub database_name: String,
    #[sqlx(try_from = "String")]
    pub status: TenantStatus,
    #[sqlx(try_from = "String")]
    pub plan: TenantPlan,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantStatus {
    Active,
    Suspended,
    Deleted,
}

impl TenantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantStatus::Active => "active",
            TenantStatus::Suspended => "suspended",
            TenantStatus::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Error)]
#[error("status de tenant desconhecido: {0}")]
pub struct UnknownTenantStatus(String);

impl TryFrom<String> for TenantStatus {
    type Error = UnknownTenantStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "active" => Ok(TenantStatus::Active),
            "suspended" => Ok(TenantStatus::Suspended),
            "deleted" => Ok(TenantStatus::Deleted),
            _ => Err(UnknownTenantStatus(value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenantPlan {
    Free,
    Pro,
    Enterprise,
}

impl TenantPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenantPlan::Free => "free",
            TenantPlan::Pro => "pro",
            TenantPlan::Enterprise => "enterprise",
        }
    }
}

#[derive(Debug, Error)]
#[error("plano de tenant desconhecido: {0}")]
pub struct UnknownTenantPlan(String);

impl TryFrom<String> for TenantPlan {
    type Error = UnknownTenantPlan;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "free" => Ok(TenantPlan::Free),
            "pro" => Ok(TenantPlan::Pro),
            "enterprise" => Ok(TenantPlan::Enterprise),
            _ => Err(UnknownTenantPlan(value)),
        }
    }
}

// ---
// 2. NewTenant (dados para o INSERT no diretório)
// ---
// O id já vem alocado pelo serviço de ciclo de vida, porque o nome do
// banco é derivado dele antes da linha existir.
#[derive(Debug, Clone)]
pub struct NewTenant {
    pub id: Uuid,
    pub slug: String,
    pub theme: String,
    pub name: String,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub owner_user_id: Uuid,
    pub owner_username: String,
    pub database_name: String,
}

// Validador de charset para slugs (minúsculas, números e hífens).
pub fn validate_slug_charset(slug: &str) -> Result<(), ValidationError> {
    let ok = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if ok {
        Ok(())
    } else {
        let mut error = ValidationError::new("slug_charset");
        error.message =
            Some("Slug só pode conter letras minúsculas, números e hífens.".into());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_e_plano_fazem_roundtrip_com_o_banco() {
        for status in [TenantStatus::Active, TenantStatus::Suspended, TenantStatus::Deleted] {
            assert_eq!(TenantStatus::try_from(status.as_str().to_string()).unwrap(), status);
        }
        for plan in [TenantPlan::Free, TenantPlan::Pro, TenantPlan::Enterprise] {
            assert_eq!(TenantPlan::try_from(plan.as_str().to_string()).unwrap(), plan);
        }
        assert!(TenantStatus::try_from("archived".to_string()).is_err());
    }

    #[test]
    fn charset_de_slug() {
        assert!(validate_slug_charset("alice-blog-2").is_ok());
        assert!(validate_slug_charset("").is_err());
        assert!(validate_slug_charset("Alice").is_err());
        assert!(validate_slug_charset("alice blog").is_err());
        assert!(validate_slug_charset("alice_blog").is_err());
    }
}
