// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::AppError, config::AppState, middleware::tenancy::TenantContext,
    models::auth::Principal,
};

// Resolve a identidade do requisitante quando há um token Bearer. Sem
// token a requisição segue anônima; rotas protegidas rejeitam depois, no
// extrator CurrentUser. Token presente mas inválido é erro aqui mesmo.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(TypedHeader(Authorization(bearer))) = bearer {
        // O tenant contextual (se houver) já foi anexado pelo tenant_guard,
        // que roda antes — é ele que habilita o fallback do dono.
        let contextual_tenant = request
            .extensions()
            .get::<TenantContext>()
            .map(|ctx| ctx.tenant.clone());

        let principal = app_state
            .auth_service
            .resolve_principal(bearer.token(), contextual_tenant.as_ref())
            .await?;

        request.extensions_mut().insert(principal);
    }

    Ok(next.run(request).await)
}

// Extrator para obter o principal autenticado diretamente nos handlers
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AppError::InvalidCredential)
    }
}
