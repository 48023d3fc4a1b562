use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Cada variante de erro de cliente carrega um `code` estável (verificável
// por máquina) além da mensagem; erros internos são opacos para o cliente
// e logados com detalhe no servidor.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- Resolução de tenant ---
    #[error("Tenant não encontrado")]
    TenantNotFound,

    #[error("Tenant não está ativo")]
    TenantInactive,

    #[error("Contexto de tenant obrigatório")]
    TenantContextRequired,

    // Violação de invariante no registro de conexões: alguém tentou abrir
    // um banco que não é de tenant pelo caminho de tenant.
    #[error("Nome de banco de tenant inválido: {0}")]
    InvalidTenantDatabaseName(String),

    // --- Autenticação ---
    #[error("Credencial inválida ou ausente")]
    InvalidCredential,

    #[error("Usuário da credencial não encontrado ou inativo")]
    PrincipalNotFound,

    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    // --- Ciclo de vida de tenants ---
    #[error("Slug já está em uso")]
    SlugTaken,

    #[error("Slug é uma palavra reservada")]
    SlugReserved,

    #[error("Usuário dono não encontrado")]
    OwnerNotFound,

    #[error("Sem autorização para esta operação")]
    NotAuthorized,

    // --- Recursos ---
    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Post não encontrado")]
    PostNotFound,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Username já existe")]
    UsernameAlreadyExists,

    #[error("Violação de chave única: {0}")]
    UniqueConstraintViolation(String),

    // --- Infra ---
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de migração")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    // (status, code, mensagem para o cliente)
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AppError::ValidationError(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Um ou mais campos são inválidos.",
            ),
            AppError::TenantNotFound => (
                StatusCode::BAD_REQUEST,
                "TENANT_NOT_FOUND",
                "Tenant inválido ou inexistente.",
            ),
            AppError::TenantInactive => (
                StatusCode::BAD_REQUEST,
                "TENANT_INACTIVE",
                "Este tenant não está ativo.",
            ),
            AppError::TenantContextRequired => (
                StatusCode::BAD_REQUEST,
                "TENANT_CONTEXT_REQUIRED",
                "O cabeçalho x-tenant-id é obrigatório nesta rota.",
            ),
            AppError::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIAL",
                "Token de autenticação inválido ou ausente.",
            ),
            AppError::PrincipalNotFound => (
                StatusCode::UNAUTHORIZED,
                "PRINCIPAL_NOT_FOUND",
                "Usuário não encontrado ou inativo.",
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "E-mail ou senha inválidos.",
            ),
            AppError::SlugTaken => (
                StatusCode::BAD_REQUEST,
                "SLUG_TAKEN",
                "Este slug já está em uso.",
            ),
            AppError::SlugReserved => (
                StatusCode::BAD_REQUEST,
                "SLUG_RESERVED",
                "Este slug é uma palavra reservada.",
            ),
            AppError::OwnerNotFound => (
                StatusCode::BAD_REQUEST,
                "OWNER_NOT_FOUND",
                "Usuário dono não encontrado.",
            ),
            AppError::NotAuthorized => (
                StatusCode::FORBIDDEN,
                "NOT_AUTHORIZED",
                "Você não tem autorização para esta operação.",
            ),
            AppError::UserNotFound => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                "Usuário não encontrado.",
            ),
            AppError::PostNotFound => (
                StatusCode::NOT_FOUND,
                "POST_NOT_FOUND",
                "Post não encontrado.",
            ),
            AppError::EmailAlreadyExists => (
                StatusCode::CONFLICT,
                "EMAIL_ALREADY_EXISTS",
                "Este e-mail já está em uso.",
            ),
            AppError::UsernameAlreadyExists => (
                StatusCode::CONFLICT,
                "USERNAME_ALREADY_EXISTS",
                "Este username já está em uso.",
            ),
            // Todos os outros (infra) viram 500 opaco; o detalhe vai pro log.
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Ocorreu um erro inesperado.",
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Retorna todos os detalhes da validação, campo a campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "error": "Um ou mais campos são inválidos.",
                "code": "VALIDATION_ERROR",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        let (status, code, message) = self.parts();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {:?}", self);
        }

        let body = Json(json!({ "error": message, "code": code }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn erros_de_cliente_carregam_status_e_code() {
        let cases = [
            (AppError::TenantNotFound, StatusCode::BAD_REQUEST, "TENANT_NOT_FOUND"),
            (AppError::TenantInactive, StatusCode::BAD_REQUEST, "TENANT_INACTIVE"),
            (AppError::SlugTaken, StatusCode::BAD_REQUEST, "SLUG_TAKEN"),
            (AppError::SlugReserved, StatusCode::BAD_REQUEST, "SLUG_RESERVED"),
            (AppError::OwnerNotFound, StatusCode::BAD_REQUEST, "OWNER_NOT_FOUND"),
            (AppError::InvalidCredential, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIAL"),
            (AppError::PrincipalNotFound, StatusCode::UNAUTHORIZED, "PRINCIPAL_NOT_FOUND"),
            (AppError::NotAuthorized, StatusCode::FORBIDDEN, "NOT_AUTHORIZED"),
            (AppError::EmailAlreadyExists, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS"),
        ];

        for (err, status, code) in cases {
            let response = err.into_response();
            assert_eq!(response.status(), status);
            let body = body_json(response).await;
            assert_eq!(body["code"], code);
        }
    }

    #[tokio::test]
    async fn nome_de_banco_invalido_vira_erro_interno_opaco() {
        // Violação de invariante é erro de programação, não do cliente.
        let response =
            AppError::InvalidTenantDatabaseName("master".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
    }
}
