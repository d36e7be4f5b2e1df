// src/web/mw_role.rs
use crate::{error::AppError, web::mw_auth::AuthUser};
use axum::{extract::Request, middleware::Next, response::Response, Extension};

/// Posições que podem criar alunos, agendamentos e reposições.
pub const STAFF_POSITIONS: &[&str] = &["Coordenacao", "Preceptor"];

/// Middleware que permite Coordenação ou Preceptor.
/// Deve ser executado *depois* do middleware `require_auth`.
pub async fn require_staff(
    Extension(auth): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if STAFF_POSITIONS.iter().any(|p| *p == auth.position) {
        tracing::debug!("Role MW: acesso concedido para usuário {}.", auth.id);
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            "Role MW: acesso negado para usuário {} (posição '{}').",
            auth.id,
            auth.position
        );
        Err(AppError::Forbidden(
            "Você não tem permissão para realizar esta ação.".to_string(),
        ))
    }
}

/// Middleware que permite apenas Coordenação (alteração e remoção de
/// agendamentos). Deve ser executado *depois* de `require_auth`.
pub async fn require_coordenacao(
    Extension(auth): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if auth.position == "Coordenacao" {
        tracing::debug!("Role MW: acesso de Coordenação concedido para {}.", auth.id);
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            "Role MW: acesso negado para usuário {} (exige Coordenacao, tem '{}').",
            auth.id,
            auth.position
        );
        Err(AppError::Forbidden(
            "Apenas a Coordenação pode realizar esta ação.".to_string(),
        ))
    }
}
