// src/models/schedule.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Representa um agendamento de reposição (slot de data + turno).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub id: i64,
    pub schedule_date: NaiveDate,
    pub shift: String, // 'Manhã', 'Tarde' ou 'Noite'
    pub max_capacity: i64,
    pub created_by_user_id: i64,
    pub updated_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

// Payload do POST /schedules
#[derive(Debug, Deserialize)]
pub struct CreateSchedulePayload {
    pub schedule_date: NaiveDate,
    pub shift: String,
    // Quando ausente, a capacidade padrão é 30
    pub max_capacity: Option<i64>,
}

// Payload do PUT /schedules/{id}: só os campos presentes são atualizados
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSchedulePayload {
    pub schedule_date: Option<NaiveDate>,
    pub shift: Option<String>,
    pub max_capacity: Option<i64>,
}
