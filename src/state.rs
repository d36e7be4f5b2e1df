// src/state.rs
use crate::error::AppResult;
use sqlx::SqlitePool;

/// Configuração lida uma única vez no arranque (nada de estado global
/// mutável: o segredo viaja dentro do AppState).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let jwt_secret = std::env::var("JWT_SECRET")?;
        if jwt_secret.len() < 32 {
            tracing::warn!("⚠️ JWT_SECRET é curto, considere usar uma chave mais longa e aleatória!");
        }
        Ok(Self { jwt_secret })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: AppConfig,
}

// Permite extrair o pool da DB diretamente
impl axum::extract::FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> SqlitePool {
        state.db_pool.clone()
    }
}

impl axum::extract::FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> AppConfig {
        state.config.clone()
    }
}
