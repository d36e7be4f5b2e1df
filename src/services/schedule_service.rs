// src/services/schedule_service.rs
use crate::{
    error::{AppError, AppResult},
    models::schedule::{CreateSchedulePayload, Schedule, UpdateSchedulePayload},
};
use sqlx::SqlitePool;

/// Turnos aceites na tabela 'schedules'.
pub const DEFINED_SHIFTS: &[&str] = &["Manhã", "Tarde", "Noite"];

/// Limite de agendamentos por data.
pub const MAX_SCHEDULES_PER_DATE: i64 = 3;

const SCHEDULE_COLUMNS: &str = "id, schedule_date, shift, max_capacity, \
     created_by_user_id, updated_at, created_at";

fn validate_shift(shift: &str) -> AppResult {
    if DEFINED_SHIFTS.iter().any(|s| *s == shift) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Turno inválido: '{}'. Use 'Manhã', 'Tarde' ou 'Noite'.",
            shift
        )))
    }
}

pub async fn find_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<Schedule>> {
    tracing::debug!("Buscando agendamento por id: {}", id);
    let schedule = sqlx::query_as::<_, Schedule>(&format!(
        "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db_pool)
    .await?;

    Ok(schedule)
}

pub async fn find_all(db_pool: &SqlitePool) -> AppResult<Vec<Schedule>> {
    tracing::debug!("Buscando todos os agendamentos...");
    let schedules = sqlx::query_as::<_, Schedule>(&format!(
        "SELECT {SCHEDULE_COLUMNS} FROM schedules ORDER BY schedule_date ASC, id ASC"
    ))
    .fetch_all(db_pool)
    .await?;

    Ok(schedules)
}

/// Cria um agendamento aplicando as duas regras de negócio dentro de uma
/// única transação:
/// 1. no máximo um agendamento por (data, turno);
/// 2. no máximo 3 agendamentos por data.
/// A UNIQUE (schedule_date, shift) da tabela fecha a corrida entre duas
/// criações concorrentes que passem pela verificação ao mesmo tempo.
pub async fn create(
    db_pool: &SqlitePool,
    payload: CreateSchedulePayload,
    acting_user_id: i64,
) -> AppResult<Schedule> {
    tracing::info!(
        "Tentando criar agendamento para {} ({})...",
        payload.schedule_date,
        payload.shift
    );
    validate_shift(&payload.shift)?;
    let max_capacity = payload.max_capacity.unwrap_or(30);

    let mut tx = db_pool.begin().await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM schedules WHERE schedule_date = ? AND shift = ?")
            .bind(payload.schedule_date)
            .bind(&payload.shift)
            .fetch_optional(&mut *tx)
            .await?;

    if existing.is_some() {
        tracing::warn!(
            "Agendamento recusado: turno '{}' já ocupado em {}.",
            payload.shift,
            payload.schedule_date
        );
        return Err(AppError::Conflict(
            "Já existe agendamento para este turno nesta data.".to_string(),
        ));
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules WHERE schedule_date = ?")
        .bind(payload.schedule_date)
        .fetch_one(&mut *tx)
        .await?;

    if count >= MAX_SCHEDULES_PER_DATE {
        tracing::warn!(
            "Agendamento recusado: {} já tem {} agendamentos.",
            payload.schedule_date,
            count
        );
        return Err(AppError::Conflict(
            "O limite máximo de 3 agendamentos para esta data foi atingido.".to_string(),
        ));
    }

    let result = sqlx::query_as::<_, Schedule>(&format!(
        r#"
        INSERT INTO schedules (schedule_date, shift, max_capacity, created_by_user_id)
        VALUES (?, ?, ?, ?)
        RETURNING {SCHEDULE_COLUMNS}
        "#
    ))
    .bind(payload.schedule_date)
    .bind(&payload.shift)
    .bind(max_capacity)
    .bind(acting_user_id)
    .fetch_one(&mut *tx)
    .await;

    let schedule = match result {
        Ok(schedule) => schedule,
        Err(e) if super::is_unique_violation(&e) => {
            return Err(AppError::Conflict(
                "Já existe agendamento para este turno nesta data.".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    tx.commit().await?;
    tracing::info!("✅ Agendamento {} criado com sucesso.", schedule.id);
    Ok(schedule)
}

/// Atualização parcial: só os campos presentes sobrescrevem os atuais.
pub async fn update(
    db_pool: &SqlitePool,
    id: i64,
    payload: UpdateSchedulePayload,
) -> AppResult<Schedule> {
    if payload.schedule_date.is_none()
        && payload.shift.is_none()
        && payload.max_capacity.is_none()
    {
        return Err(AppError::BadRequest(
            "Pelo menos um campo (schedule_date, shift ou max_capacity) deve ser fornecido."
                .to_string(),
        ));
    }

    if let Some(shift) = payload.shift.as_deref() {
        validate_shift(shift)?;
    }

    let result = sqlx::query_as::<_, Schedule>(&format!(
        r#"
        UPDATE schedules
        SET
            schedule_date = COALESCE(?, schedule_date),
            shift = COALESCE(?, shift),
            max_capacity = COALESCE(?, max_capacity)
        WHERE id = ?
        RETURNING {SCHEDULE_COLUMNS}
        "#
    ))
    .bind(payload.schedule_date)
    .bind(&payload.shift)
    .bind(payload.max_capacity)
    .bind(id)
    .fetch_optional(db_pool)
    .await;

    match result {
        Ok(Some(schedule)) => {
            tracing::info!("✅ Agendamento {} atualizado com sucesso.", id);
            Ok(schedule)
        }
        Ok(None) => {
            tracing::warn!("Falha ao atualizar: agendamento {} não encontrado.", id);
            Err(AppError::NotFound(format!(
                "Agendamento {} não encontrado.",
                id
            )))
        }
        Err(e) if super::is_unique_violation(&e) => Err(AppError::Conflict(
            "Já existe agendamento para este turno nesta data.".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Remove um agendamento. Devolve o número de linhas apagadas (0 quando
/// o id não existe).
pub async fn delete(db_pool: &SqlitePool, id: i64) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM schedules WHERE id = ?")
        .bind(id)
        .execute(db_pool)
        .await;

    match result {
        Ok(done) => Ok(done.rows_affected()),
        Err(e) if super::is_foreign_key_violation(&e) => Err(AppError::Conflict(
            "Agendamento vinculado a reposições não pode ser removido.".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}
