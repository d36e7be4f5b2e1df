// src/models/student.rs
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

// Representa um aluno lido da tabela 'students'. O access_code nunca vem
// do cliente: é sempre derivado dos 4 últimos caracteres do RGM.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub rgm: String,
    pub current_semester: String, // '7 Semestre', '8 Semestre' ou '7/8 Semestre'
    pub access_code: String,
    pub created_by_user_id: i64,
    pub updated_by_user_id: Option<i64>,
    pub updated_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

// O RGM pode chegar como string ou como número no JSON; é sempre
// coagido para string antes de qualquer comparação ou escrita.
#[derive(Deserialize)]
#[serde(untagged)]
enum RgmInput {
    Texto(String),
    Numero(i64),
}

impl RgmInput {
    fn into_string(self) -> String {
        match self {
            RgmInput::Texto(s) => s,
            RgmInput::Numero(n) => n.to_string(),
        }
    }
}

fn rgm_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RgmInput::deserialize(deserializer).map(RgmInput::into_string)
}

fn rgm_opt_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RgmInput>::deserialize(deserializer)
        .map(|rgm| rgm.map(RgmInput::into_string))
}

// Payload do POST /students
#[derive(Debug, Deserialize)]
pub struct CreateStudentPayload {
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "rgm_as_string")]
    pub rgm: String,
    pub current_semester: String,
}

// Payload do PUT /students/{id}: só os campos presentes são atualizados
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStudentPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "rgm_opt_as_string")]
    pub rgm: Option<String>,
    pub current_semester: Option<String>,
}

// Payload do POST /students/login (RGM + código de acesso)
#[derive(Debug, Deserialize)]
pub struct StudentLoginPayload {
    #[serde(default, deserialize_with = "rgm_opt_as_string")]
    pub rgm: Option<String>,
    pub access_code: Option<String>,
}
