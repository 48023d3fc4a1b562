// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Representa um usuário vindo do banco de um tenant
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub display_name: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub tagline: Option<String>,
    pub location: Option<String>,
    pub role: String,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário (sempre dentro de um tenant)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 3, max = 32, message = "O username deve ter entre 3 e 32 caracteres."))]
    pub username: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    pub display_name: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserPayload {
    #[validate(length(min = 1, message = "Informe o username ou e-mail."))]
    pub username_or_email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Atualização de perfil (sempre no banco do tenant de origem do usuário)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, max = 80))]
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    #[validate(length(max = 120))]
    pub tagline: Option<String>,
    #[validate(length(max = 120))]
    pub location: Option<String>,
}

// Resposta de autenticação com o token e um resumo do usuário
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub tenant_id: Uuid,
}

// Estrutura de dados ("claims") dentro do JWT.
// `tenant_id` é o tenant de ORIGEM do usuário (onde a conta dele vive),
// que pode ser diferente do tenant da requisição.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
    pub tenant_id: Uuid,
    pub exp: usize,
    pub iat: usize,
}

// A identidade resolvida do requisitante, válida por uma requisição.
// Nunca é persistida.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub display_name: String,
    pub role: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub tenant_id: Uuid,
}

impl Principal {
    // Constrói a partir da linha viva do usuário: papel e perfil sempre
    // frescos, nunca os claims possivelmente desatualizados do token.
    pub fn from_user(user: &User, home_tenant_id: Uuid) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            role: user.role.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
            tenant_id: home_tenant_id,
        }
    }

    // Fallback do dono recém-criado: o tenant existe, mas a linha de
    // usuário do dono ainda não. Sintetiza um principal mínimo só com os
    // claims; o tenant_id continua sendo o do token.
    pub fn bootstrap_owner(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email.clone(),
            username: claims.username.clone(),
            display_name: claims.username.clone(),
            role: "owner".to_string(),
            bio: None,
            avatar: None,
            tenant_id: claims.tenant_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn claims(tenant_id: Uuid) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: "alice@example.com".into(),
            username: "alice".into(),
            role: "author".into(),
            tenant_id,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn bootstrap_owner_usa_o_tenant_do_token() {
        let home = Uuid::new_v4();
        let claims = claims(home);
        let principal = Principal::bootstrap_owner(&claims);

        assert_eq!(principal.role, "owner");
        assert_eq!(principal.id, claims.sub);
        // O tenant do principal é o de origem (do token), nunca o contextual.
        assert_eq!(principal.tenant_id, home);
        assert_eq!(principal.display_name, "alice");
    }
}
