// src/web/schedule_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::schedule::{CreateSchedulePayload, UpdateSchedulePayload},
    services::schedule_service,
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

// POST /schedules — aplica as regras de turno ocupado e limite diário
pub async fn handle_create_schedule(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateSchedulePayload>,
) -> AppResult<impl IntoResponse> {
    let schedule = schedule_service::create(&state.db_pool, payload, auth.id).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

// GET /schedules
pub async fn handle_list_schedules(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let schedules = schedule_service::find_all(&state.db_pool).await?;
    Ok(Json(schedules))
}

// GET /schedules/{id}
pub async fn handle_get_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let schedule = schedule_service::find_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Agendamento {} não encontrado.", id)))?;
    Ok(Json(schedule))
}

// PUT /schedules/{id} — exclusivo da Coordenação (ver routes.rs)
pub async fn handle_update_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateSchedulePayload>,
) -> AppResult<impl IntoResponse> {
    let schedule = schedule_service::update(&state.db_pool, id, payload).await?;
    Ok(Json(schedule))
}

// DELETE /schedules/{id} — exclusivo da Coordenação (ver routes.rs)
pub async fn handle_delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = schedule_service::delete(&state.db_pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!(
            "Agendamento {} não encontrado.",
            id
        )));
    }
    Ok(Json(json!({ "deleted": deleted })))
}
