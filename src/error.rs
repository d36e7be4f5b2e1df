// src/error.rs
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Erro ao processar password")]
    PasswordHashingError,

    // Login com e-mail/senha ou RGM/código de acesso incorretos
    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("{0}")]
    BadRequest(String),

    #[error("Não autorizado")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Erro interno inesperado")]
    InternalServerError,
}

// Como converter AppError numa resposta HTTP (status + JSON { message })
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor; o cliente só vê a mensagem
        tracing::error!("Erro processado: {:?}", self);

        let (status, message) = match self {
            AppError::SqlxError(_) | AppError::SqlxMigrateError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao aceder aos dados.".to_string(),
            ),
            AppError::EnvVarError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro de configuração.".to_string(),
            ),
            AppError::PasswordHashingError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro ao processar credenciais.".to_string(),
            ),
            // Mensagem genérica: não revelar se o e-mail existe
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Credenciais inválidas.".to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Token inválido ou expirado.".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Ocorreu um erro inesperado.".to_string(),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
