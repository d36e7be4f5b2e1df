// src/services/replacement_service.rs
use crate::{
    error::{AppError, AppResult},
    models::replacement::{
        CreateReplacementPayload, Replacement, ReplacementSummary, UpdateReplacementPayload,
    },
};
use sqlx::SqlitePool;

/// Justificativas aceites na tabela 'replacements'.
pub const DEFINED_JUSTIFICATIONS: &[&str] = &[
    "Escala 12x36",
    "Atestado",
    "Matricula Tardia",
    "Autorização do Professor",
];

const REPLACEMENT_COLUMNS: &str = "id, student_id, schedule_id, justification, \
     is_present, preceptor_add_by, schedule_at";

fn validate_justification(justification: &str) -> AppResult {
    if DEFINED_JUSTIFICATIONS.iter().any(|j| *j == justification) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Justificativa inválida: '{}'.",
            justification
        )))
    }
}

pub async fn find_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Replacement>> {
    tracing::debug!("Buscando reposição por id: {}", id);
    let replacement = sqlx::query_as::<_, Replacement>(&format!(
        "SELECT {REPLACEMENT_COLUMNS} FROM replacements WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?;

    Ok(replacement)
}

/// Listagem com a projeção fixa (sem student_id/schedule_id).
pub async fn find_all(db_pool: &SqlitePool) -> AppResult<Vec<ReplacementSummary>> {
    tracing::debug!("Buscando todas as reposições...");
    let replacements = sqlx::query_as::<_, ReplacementSummary>(
        r#"
        SELECT id, justification, is_present, preceptor_add_by, schedule_at
        FROM replacements
        ORDER BY schedule_at ASC, id ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;

    Ok(replacements)
}

/// Cria uma reposição. Todos os campos obrigatórios precisam de estar
/// presentes; o preceptor que registrou fica carimbado em
/// preceptor_add_by.
pub async fn create(
    db_pool: &SqlitePool,
    payload: CreateReplacementPayload,
    acting_user_id: i64,
) -> AppResult<Replacement> {
    let (student_id, schedule_id, justification, schedule_at) = match (
        payload.student_id,
        payload.schedule_id,
        payload.justification,
        payload.schedule_at,
    ) {
        (Some(student_id), Some(schedule_id), Some(justification), Some(schedule_at)) => {
            (student_id, schedule_id, justification, schedule_at)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Todos os campos obrigatórios (student_id, schedule_id, justification e schedule_at) devem ser preenchidos."
                    .to_string(),
            ));
        }
    };

    validate_justification(&justification)?;
    let is_present = payload.is_present.unwrap_or(false);

    tracing::info!(
        "Tentando criar reposição do aluno {} no agendamento {}...",
        student_id,
        schedule_id
    );

    let result = sqlx::query_as::<_, Replacement>(&format!(
        r#"
        INSERT INTO replacements
            (student_id, schedule_id, justification, is_present,
             preceptor_add_by, schedule_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {REPLACEMENT_COLUMNS}
        "#
    ))
    .bind(student_id)
    .bind(schedule_id)
    .bind(&justification)
    .bind(is_present)
    .bind(acting_user_id)
    .bind(schedule_at)
    .fetch_one(db_pool)
    .await;

    match result {
        Ok(replacement) => {
            tracing::info!("✅ Reposição {} criada com sucesso.", replacement.id);
            Ok(replacement)
        }
        Err(e) if super::is_foreign_key_violation(&e) => {
            tracing::warn!(
                "Falha ao criar reposição: aluno {} ou agendamento {} inexistente.",
                student_id,
                schedule_id
            );
            Err(AppError::BadRequest(
                "Aluno ou agendamento inexistente.".to_string(),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Atualização parcial: só os campos presentes sobrescrevem os atuais.
pub async fn update(
    db_pool: &SqlitePool,
    id: i64,
    payload: UpdateReplacementPayload,
) -> AppResult<Replacement> {
    if payload.student_id.is_none()
        && payload.schedule_id.is_none()
        && payload.justification.is_none()
        && payload.is_present.is_none()
        && payload.schedule_at.is_none()
    {
        return Err(AppError::BadRequest(
            "Pelo menos um campo deve ser fornecido.".to_string(),
        ));
    }

    if let Some(justification) = payload.justification.as_deref() {
        validate_justification(justification)?;
    }

    let result = sqlx::query_as::<_, Replacement>(&format!(
        r#"
        UPDATE replacements
        SET
            student_id = COALESCE(?, student_id),
            schedule_id = COALESCE(?, schedule_id),
            justification = COALESCE(?, justification),
            is_present = COALESCE(?, is_present),
            schedule_at = COALESCE(?, schedule_at)
        WHERE id = ?
        RETURNING {REPLACEMENT_COLUMNS}
        "#
    ))
    .bind(payload.student_id)
    .bind(payload.schedule_id)
    .bind(&payload.justification)
    .bind(payload.is_present)
    .bind(payload.schedule_at)
    .bind(id)
    .fetch_optional(db_pool)
    .await;

    match result {
        Ok(Some(replacement)) => {
            tracing::info!("✅ Reposição {} atualizada com sucesso.", id);
            Ok(replacement)
        }
        Ok(None) => {
            tracing::warn!("Falha ao atualizar: reposição {} não encontrada.", id);
            Err(AppError::NotFound(format!(
                "Reposição {} não encontrada.",
                id
            )))
        }
        Err(e) if super::is_foreign_key_violation(&e) => Err(AppError::BadRequest(
            "Aluno ou agendamento inexistente.".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Remove uma reposição. Devolve o número de linhas apagadas (0 quando o
/// id não existe).
pub async fn delete(db_pool: &SqlitePool, id: i64) -> AppResult<u64> {
    let deleted = sqlx::query("DELETE FROM replacements WHERE id = ?")
        .bind(id)
        .execute(db_pool)
        .await?
        .rows_affected();

    Ok(deleted)
}
