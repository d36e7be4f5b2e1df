// src/web/user_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUserPayload, LoginPayload, UpdateUserPayload},
    services::{auth_service, user_service},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

// POST /users/login — autentica e devolve { user, token }
pub async fn handle_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<impl IntoResponse> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            return Err(AppError::BadRequest(
                "E-mail e senha são obrigatórios.".to_string(),
            ));
        }
    };

    tracing::info!("Tentativa de login para: {}", email);
    let user = auth_service::authenticate(&state.db_pool, &email, &password).await?;
    let token = auth_service::generate_token(&user, &state.config.jwt_secret)?;

    tracing::info!("✅ Login bem-sucedido para: {}", user.email);
    Ok(Json(json!({ "user": user, "token": token })))
}

// POST /users
pub async fn handle_create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> AppResult<impl IntoResponse> {
    let user = user_service::create(&state.db_pool, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// GET /users
pub async fn handle_list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = user_service::find_all(&state.db_pool).await?;
    Ok(Json(users))
}

// GET /users/{id}
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let user = user_service::find_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Usuário {} não encontrado.", id)))?;
    Ok(Json(user))
}

// PUT /users/{id}
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserPayload>,
) -> AppResult<impl IntoResponse> {
    let user = user_service::update(&state.db_pool, id, payload).await?;
    Ok(Json(user))
}

// DELETE /users/{id}
pub async fn handle_delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = user_service::delete(&state.db_pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Usuário {} não encontrado.", id)));
    }
    Ok(Json(json!({ "deleted": deleted })))
}
