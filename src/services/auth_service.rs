// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::UserPublic,
    services::user_service,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Validade do token: 1 dia.
pub const TOKEN_VALIDITY_SECONDS: i64 = 60 * 60 * 24;

/// Claims do token: o payload carrega o id e a posição do usuário para
/// que os middlewares de role não precisem de ir à base de dados.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub position: String,
    pub iat: usize,
    pub exp: usize,
}

/// Verifica se a senha fornecida corresponde ao hash guardado.
pub async fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Verificando hash bcrypt...");
        bcrypt::verify(&password, &stored_hash)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (verify_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao verificar senha: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Gera um hash bcrypt para uma senha.
pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        tracing::debug!("Gerando hash bcrypt...");
        bcrypt::hash(&password, bcrypt::DEFAULT_COST)
    })
    .await
    .map_err(|e| {
        tracing::error!("Erro na task spawn_blocking (hash_password): {:?}", e);
        AppError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Erro bcrypt ao gerar hash: {:?}", e);
        AppError::PasswordHashingError
    })
}

/// Autentica por e-mail + senha e devolve o usuário sem a coluna da
/// senha. A mensagem de falha é a mesma para e-mail desconhecido e para
/// senha errada.
pub async fn authenticate(
    db_pool: &SqlitePool,
    email: &str,
    password: &str,
) -> AppResult<UserPublic> {
    let user = match user_service::find_by_email(db_pool, email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login falhou: e-mail '{}' não cadastrado.", email);
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password).await? {
        tracing::warn!("Login falhou: senha incorreta para '{}'.", email);
        return Err(AppError::InvalidCredentials);
    }

    Ok(UserPublic {
        id: user.id,
        name: user.name,
        email: user.email,
        position: user.position,
    })
}

/// Assina um token com { id, position } e validade de 1 dia.
pub fn generate_token(user: &UserPublic, secret: &str) -> AppResult<String> {
    let now = Utc::now();
    let exp = now
        .checked_add_signed(Duration::seconds(TOKEN_VALIDITY_SECONDS))
        .ok_or(AppError::InternalServerError)?
        .timestamp() as usize;

    let claims = Claims {
        id: user.id,
        position: user.position.clone(),
        iat: now.timestamp() as usize,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Erro ao assinar token: {:?}", e);
        AppError::InternalServerError
    })
}

/// Valida um token e devolve as claims. Token expirado ou adulterado é
/// sempre `Unauthorized`.
pub fn decode_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Token rejeitado: {:?}", e);
        AppError::Unauthorized
    })
}
