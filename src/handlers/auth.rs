// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::CurrentUser, tenancy::TenantContext},
    models::auth::{LoginUserPayload, Principal, RegisterUserPayload},
};

// Registro e login são sempre escopados por tenant: a conta nasce no banco
// do blog da requisição, e o token emitido carrega esse blog como origem.
pub async fn register(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .auth_service
        .signup(&ctx.pool, ctx.tenant.id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(app_state): State<AppState>,
    ctx: TenantContext,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .auth_service
        .login(&ctx.pool, ctx.tenant.id, payload)
        .await?;

    Ok(Json(response))
}

// Handler da rota protegida /me
pub async fn get_me(CurrentUser(principal): CurrentUser) -> Json<Principal> {
    Json(principal)
}
