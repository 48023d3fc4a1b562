// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::tenancy::{Tenant, TenantStatus},
};

// O nome do nosso cabeçalho HTTP customizado
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

// Contexto do tenant da requisição: o registro do diretório e a conexão
// viva com o banco dele. Existe só durante a requisição e nunca é
// persistido.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub tenant: Tenant,
    pub pool: PgPool,
}

// Roda em TODA requisição, antes do auth_guard: o fallback do dono
// recém-criado na resolução de identidade depende do tenant contextual já
// estar anexado.
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Sem cabeçalho, segue sem contexto: muitas rotas são globais
    // (feed, busca, lookup de tenant).
    let Some(raw) = request.headers().get(TENANT_ID_HEADER) else {
        return Ok(next.run(request).await);
    };

    let tenant_id = raw
        .to_str()
        .ok()
        .and_then(|value| Uuid::parse_str(value).ok())
        .ok_or(AppError::TenantNotFound)?;

    let tenant = app_state
        .tenant_service
        .find_by_id(tenant_id)
        .await?
        .ok_or(AppError::TenantNotFound)?;

    if tenant.status != TenantStatus::Active {
        return Err(AppError::TenantInactive);
    }

    let pool = app_state
        .registry
        .get_tenant_connection(&tenant.database_name)?;

    request.extensions_mut().insert(TenantContext { tenant, pool });

    Ok(next.run(request).await)
}

// Extrator para rotas que EXIGEM escopo de tenant
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .ok_or(AppError::TenantContextRequired)
    }
}

// Versão opcional, para rotas globais que só aproveitam o escopo se ele
// estiver presente (busca, por exemplo)
impl<S> OptionalFromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<TenantContext>().cloned())
    }
}
