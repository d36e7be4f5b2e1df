// src/services/student_service.rs
use crate::{
    error::{AppError, AppResult},
    models::student::{CreateStudentPayload, Student, UpdateStudentPayload},
};
use sqlx::SqlitePool;

/// Semestres aceites na tabela 'students'.
pub const DEFINED_SEMESTERS: &[&str] = &["7 Semestre", "8 Semestre", "7/8 Semestre"];

const STUDENT_COLUMNS: &str = "id, name, email, rgm, current_semester, access_code, \
     created_by_user_id, updated_by_user_id, updated_at, created_at";

/// Código de acesso do aluno: os 4 últimos caracteres do RGM.
pub fn access_code_from_rgm(rgm: &str) -> String {
    let len = rgm.chars().count();
    rgm.chars().skip(len.saturating_sub(4)).collect()
}

fn validate_semester(semester: &str) -> AppResult {
    if DEFINED_SEMESTERS.iter().any(|s| *s == semester) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Semestre inválido: '{}'.",
            semester
        )))
    }
}

pub async fn find_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Student>> {
    tracing::debug!("Buscando aluno por id: {}", id);
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?;

    Ok(student)
}

pub async fn find_by_rgm(db_pool: &SqlitePool, rgm: &str) -> AppResult<Option<Student>> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE rgm = ?"
    ))
    .bind(rgm)
    .fetch_optional(db_pool)
    .await?;

    Ok(student)
}

pub async fn find_all(db_pool: &SqlitePool) -> AppResult<Vec<Student>> {
    tracing::debug!("Buscando todos os alunos...");
    let students = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id ASC"
    ))
    .fetch_all(db_pool)
    .await?;

    tracing::debug!("Encontrados {} alunos.", students.len());
    Ok(students)
}

/// Cria um aluno. O access_code é derivado do RGM, e o usuário que criou
/// fica carimbado em created_by/updated_by.
pub async fn create(
    db_pool: &SqlitePool,
    payload: CreateStudentPayload,
    acting_user_id: i64,
) -> AppResult<Student> {
    tracing::info!("Tentando criar aluno com RGM: {}", payload.rgm);

    if payload.rgm.trim().is_empty() {
        return Err(AppError::BadRequest("O RGM é obrigatório.".to_string()));
    }
    validate_semester(&payload.current_semester)?;

    if find_by_rgm(db_pool, &payload.rgm).await?.is_some() {
        tracing::warn!("Falha ao criar aluno: RGM '{}' já cadastrado.", payload.rgm);
        return Err(AppError::Conflict(
            "Esse RGM já está cadastrado na nossa base de dados.".to_string(),
        ));
    }

    let access_code = access_code_from_rgm(&payload.rgm);

    let result = sqlx::query_as::<_, Student>(&format!(
        r#"
        INSERT INTO students
            (name, email, rgm, current_semester, access_code,
             created_by_user_id, updated_by_user_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.rgm)
    .bind(&payload.current_semester)
    .bind(&access_code)
    .bind(acting_user_id)
    .bind(acting_user_id)
    .fetch_one(db_pool)
    .await;

    match result {
        Ok(student) => {
            tracing::info!("✅ Aluno '{}' criado com sucesso (id {}).", student.rgm, student.id);
            Ok(student)
        }
        Err(e) if super::is_unique_violation(&e) => {
            tracing::warn!("Falha ao criar aluno: RGM ou e-mail já cadastrado.");
            Err(AppError::Conflict(
                "Esse RGM já está cadastrado na nossa base de dados.".to_string(),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Atualização parcial. Quando o RGM muda, o access_code é recalculado
/// junto; quem atualizou fica carimbado em updated_by.
pub async fn update(
    db_pool: &SqlitePool,
    id: i64,
    payload: UpdateStudentPayload,
    acting_user_id: i64,
) -> AppResult<Student> {
    if payload.name.is_none()
        && payload.email.is_none()
        && payload.rgm.is_none()
        && payload.current_semester.is_none()
    {
        return Err(AppError::BadRequest(
            "Pelo menos um campo (name, email, rgm ou current_semester) deve ser fornecido."
                .to_string(),
        ));
    }

    if let Some(semester) = payload.current_semester.as_deref() {
        validate_semester(semester)?;
    }
    if let Some(rgm) = payload.rgm.as_deref() {
        if rgm.trim().is_empty() {
            return Err(AppError::BadRequest("O RGM não pode ser vazio.".to_string()));
        }
    }

    let access_code = payload.rgm.as_deref().map(access_code_from_rgm);

    let result = sqlx::query_as::<_, Student>(&format!(
        r#"
        UPDATE students
        SET
            name = COALESCE(?, name),
            email = COALESCE(?, email),
            rgm = COALESCE(?, rgm),
            current_semester = COALESCE(?, current_semester),
            access_code = COALESCE(?, access_code),
            updated_by_user_id = ?
        WHERE id = ?
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.rgm)
    .bind(&payload.current_semester)
    .bind(&access_code)
    .bind(acting_user_id)
    .bind(id)
    .fetch_optional(db_pool)
    .await;

    match result {
        Ok(Some(student)) => {
            tracing::info!("✅ Aluno {} atualizado com sucesso.", id);
            Ok(student)
        }
        Ok(None) => {
            tracing::warn!("Falha ao atualizar: aluno {} não encontrado.", id);
            Err(AppError::NotFound(format!("Aluno {} não encontrado.", id)))
        }
        Err(e) if super::is_unique_violation(&e) => Err(AppError::Conflict(
            "Esse RGM já está cadastrado na nossa base de dados.".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Autentica um aluno por RGM + código de acesso (os 4 últimos
/// caracteres do próprio RGM).
pub async fn authenticate(
    db_pool: &SqlitePool,
    rgm: &str,
    access_code: &str,
) -> AppResult<Student> {
    let student = match find_by_rgm(db_pool, rgm).await? {
        Some(student) => student,
        None => {
            tracing::warn!("Login de aluno falhou: RGM '{}' não cadastrado.", rgm);
            return Err(AppError::InvalidCredentials);
        }
    };

    let expected = access_code_from_rgm(&student.rgm);
    if access_code != expected {
        tracing::warn!("Login de aluno falhou: código de acesso não bate para '{}'.", rgm);
        return Err(AppError::InvalidCredentials);
    }

    Ok(student)
}

/// Remove um aluno. Devolve o número de linhas apagadas (0 quando o id
/// não existe).
pub async fn delete(db_pool: &SqlitePool, id: i64) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(db_pool)
        .await;

    match result {
        Ok(done) => Ok(done.rows_affected()),
        Err(e) if super::is_foreign_key_violation(&e) => Err(AppError::Conflict(
            "Aluno vinculado a reposições não pode ser removido.".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}
