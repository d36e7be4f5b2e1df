// src/web/replacement_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::replacement::{CreateReplacementPayload, UpdateReplacementPayload},
    services::replacement_service,
    state::AppState,
    web::mw_auth::AuthUser,
};
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

// POST /replacement — carimba o preceptor que registrou
pub async fn handle_create_replacement(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateReplacementPayload>,
) -> AppResult<impl IntoResponse> {
    let replacement = replacement_service::create(&state.db_pool, payload, auth.id).await?;
    Ok((StatusCode::CREATED, Json(replacement)))
}

// GET /replacement
pub async fn handle_list_replacements(
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let replacements = replacement_service::find_all(&state.db_pool).await?;
    Ok(Json(replacements))
}

// GET /replacement/{id}
pub async fn handle_get_replacement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let replacement = replacement_service::find_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reposição {} não encontrada.", id)))?;
    Ok(Json(replacement))
}

// PUT /replacement/{id}
pub async fn handle_update_replacement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateReplacementPayload>,
) -> AppResult<impl IntoResponse> {
    let replacement = replacement_service::update(&state.db_pool, id, payload).await?;
    Ok(Json(replacement))
}

// DELETE /replacement/{id}
pub async fn handle_delete_replacement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = replacement_service::delete(&state.db_pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!(
            "Reposição {} não encontrada.",
            id
        )));
    }
    Ok(Json(json!({ "deleted": deleted })))
}
