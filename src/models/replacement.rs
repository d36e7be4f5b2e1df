// src/models/replacement.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Representa uma reposição: o vínculo de um aluno a um agendamento com a
// justificativa da falta que a originou.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Replacement {
    pub id: i64,
    pub student_id: i64,
    pub schedule_id: i64,
    // 'Escala 12x36', 'Atestado', 'Matricula Tardia' ou
    // 'Autorização do Professor'
    pub justification: String,
    pub is_present: bool,
    pub preceptor_add_by: i64,
    pub schedule_at: NaiveDateTime,
}

/// Projeção da listagem. Não usamos o model `Replacement` completo para
/// espelhar os campos que a listagem sempre devolveu.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReplacementSummary {
    pub id: i64,
    pub justification: String,
    pub is_present: bool,
    pub preceptor_add_by: i64,
    pub schedule_at: NaiveDateTime,
}

// Payload do POST /replacement. Os campos são opcionais aqui para que a
// validação de obrigatórios devolva 400 com a lista esperada.
#[derive(Debug, Deserialize)]
pub struct CreateReplacementPayload {
    pub student_id: Option<i64>,
    pub schedule_id: Option<i64>,
    pub justification: Option<String>,
    pub is_present: Option<bool>,
    pub schedule_at: Option<NaiveDateTime>,
}

// Payload do PUT /replacement/{id}: só os campos presentes são atualizados
#[derive(Debug, Default, Deserialize)]
pub struct UpdateReplacementPayload {
    pub student_id: Option<i64>,
    pub schedule_id: Option<i64>,
    pub justification: Option<String>,
    pub is_present: Option<bool>,
    pub schedule_at: Option<NaiveDateTime>,
}
