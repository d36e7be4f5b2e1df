// src/web/mw_auth.rs
use crate::{error::AppError, services::auth_service, state::AppState};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

/// Dados do usuário autenticado, extraídos do token e postos nas
/// extensões da requisição para os handlers e middlewares seguintes.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub position: String,
}

// Middleware que exige um token Bearer válido
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Header "Authorization: Bearer <token>"
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            tracing::debug!("Autenticação MW: token não fornecido.");
            AppError::Unauthorized
        })?;

    // O esquema é comparado sem case, como os clientes costumam enviar
    let mut parts = auth_header.splitn(2, ' ');
    let scheme = parts.next().unwrap_or("");
    let token = parts.next().unwrap_or("");

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        tracing::debug!("Autenticação MW: formato de token inválido.");
        return Err(AppError::Unauthorized);
    }

    // Token inválido ou expirado vira Unauthorized dentro do decode
    let claims = auth_service::decode_token(token, &state.config.jwt_secret)?;
    tracing::debug!(
        "Autenticação MW: usuário {} ({}) autenticado. Prosseguindo...",
        claims.id,
        claims.position
    );

    request.extensions_mut().insert(AuthUser {
        id: claims.id,
        position: claims.position,
    });

    Ok(next.run(request).await)
}
