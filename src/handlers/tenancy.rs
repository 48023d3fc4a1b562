// src/handlers/tenancy.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentUser,
    models::tenancy::{validate_slug_charset, Tenant},
    services::tenancy_service::CreateTenantInput,
};

// ---
// 1. "Payloads" (os "formulários" da API)
// ---
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTenantPayload {
    #[validate(
        length(min = 1, max = 63, message = "O slug é obrigatório."),
        custom(function = validate_slug_charset)
    )]
    pub slug: String,
    #[validate(length(min = 1, message = "O nome do blog é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTenantPayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub theme: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckSlugQuery {
    pub slug: String,
}

// ---
// 2. Os "Handlers" (as rotas)
// ---
pub async fn create_tenant(
    State(app_state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .tenant_service
        .create(
            CreateTenantInput {
                slug: payload.slug,
                name: payload.name,
                description: payload.description,
                theme: payload.theme,
                logo: payload.logo,
            },
            principal.id,
            Some(&principal.username),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "tenant": tenant }))))
}

// Diretório público de blogs da plataforma
pub async fn list_tenants(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Tenant>>, AppError> {
    let tenants = app_state.tenant_service.find_all().await?;
    Ok(Json(tenants))
}

pub async fn list_my_tenants(
    State(app_state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<Vec<Tenant>>, AppError> {
    let tenants = app_state.tenant_service.find_by_owner(principal.id).await?;
    Ok(Json(tenants))
}

pub async fn check_slug(
    State(app_state): State<AppState>,
    Query(query): Query<CheckSlugQuery>,
) -> Result<impl IntoResponse, AppError> {
    let available = app_state.tenant_service.is_slug_available(&query.slug).await?;
    Ok(Json(json!({ "slug": query.slug, "available": available })))
}

// Lookup público por slug, com fallback pelo username do dono (permite
// acessar um blog por /u/<autor> no frontend).
pub async fn find_by_slug(
    State(app_state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Tenant>, AppError> {
    let tenant = match app_state.tenant_service.find_by_slug(&slug).await? {
        Some(tenant) => Some(tenant),
        None => app_state.tenant_service.find_by_owner_username(&slug).await?,
    };

    tenant.map(Json).ok_or(AppError::TenantNotFound)
}

pub async fn update_tenant(
    State(app_state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTenantPayload>,
) -> Result<Json<Tenant>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .tenant_service
        .update(
            id,
            principal.id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.theme.as_deref(),
            payload.logo.as_deref(),
        )
        .await?;

    Ok(Json(tenant))
}

pub async fn delete_tenant(
    State(app_state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.tenant_service.delete(id, principal.id).await?;
    Ok(Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_de_criacao_valida_o_slug() {
        let ok = CreateTenantPayload {
            slug: "alice".into(),
            name: "Alice's Blog".into(),
            description: None,
            theme: None,
            logo: None,
        };
        assert!(ok.validate().is_ok());

        let bad_charset = CreateTenantPayload {
            slug: "Alice Blog".into(),
            name: "Alice's Blog".into(),
            description: None,
            theme: None,
            logo: None,
        };
        assert!(bad_charset.validate().is_err());

        let empty = CreateTenantPayload {
            slug: "".into(),
            name: "Alice's Blog".into(),
            description: None,
            theme: None,
            logo: None,
        };
        assert!(empty.validate().is_err());
    }
}
