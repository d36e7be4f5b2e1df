// src/web/student_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::student::{CreateStudentPayload, StudentLoginPayload, UpdateStudentPayload},
    services::student_service,
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

// POST /students — cria o aluno carimbando quem o criou
pub async fn handle_create_student(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CreateStudentPayload>,
) -> AppResult<impl IntoResponse> {
    let student = student_service::create(&state.db_pool, payload, auth.id).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

// POST /students/login — autentica por RGM + código de acesso
pub async fn handle_student_login(
    State(state): State<AppState>,
    Json(payload): Json<StudentLoginPayload>,
) -> AppResult<impl IntoResponse> {
    let (rgm, access_code) = match (payload.rgm, payload.access_code) {
        (Some(rgm), Some(access_code)) => (rgm, access_code),
        _ => {
            return Err(AppError::BadRequest(
                "RGM e código de acesso são obrigatórios.".to_string(),
            ));
        }
    };

    tracing::info!("Tentativa de login de aluno com RGM: {}", rgm);
    let student = student_service::authenticate(&state.db_pool, &rgm, &access_code).await?;
    Ok(Json(student))
}

// GET /students
pub async fn handle_list_students(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let students = student_service::find_all(&state.db_pool).await?;
    Ok(Json(students))
}

// GET /students/{id}
pub async fn handle_get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let student = student_service::find_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Aluno {} não encontrado.", id)))?;
    Ok(Json(student))
}

// PUT /students/{id}
pub async fn handle_update_student(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStudentPayload>,
) -> AppResult<impl IntoResponse> {
    let student = student_service::update(&state.db_pool, id, payload, auth.id).await?;
    Ok(Json(student))
}

// DELETE /students/{id}
pub async fn handle_delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let deleted = student_service::delete(&state.db_pool, id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound(format!("Aluno {} não encontrado.", id)));
    }
    Ok(Json(json!({ "deleted": deleted })))
}
