// src/handlers/users.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentUser,
    models::auth::{UpdateProfilePayload, User},
};

// Atualização de perfil. A linha do usuário vive no banco do tenant de
// ORIGEM dele (o do token), não no tenant da requisição — a rota funciona
// até navegando no blog de outra pessoa.
pub async fn update_me(
    State(app_state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<User>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let home_db = app_state.registry.tenant_database_name(principal.tenant_id);
    let pool = app_state.registry.get_tenant_connection(&home_db)?;

    // Um principal sintetizado pelo fallback do dono ainda não tem linha
    // de usuário; aqui isso vira 404 até ele se registrar no próprio blog.
    let user = app_state
        .user_repo
        .update_profile(&pool, principal.id, &payload)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(user))
}
