// src/models/user.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Representa um usuário lido da tabela 'users', incluindo o hash da
// senha. Usado apenas internamente (autenticação); nunca é serializado
// para o cliente.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String, // hash bcrypt
    pub position: String, // 'Coordenacao' ou 'Preceptor'
}

/// Projeção sem a coluna password, usada em todas as leituras expostas.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPublic {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
}

// Payload do POST /users/login
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

// Payload do POST /users
#[derive(Debug, Deserialize)]
pub struct CreateUserPayload {
    pub name: String,
    pub email: String,
    pub password: String,
    // Quando ausente, a posição padrão é 'Preceptor'
    pub position: Option<String>,
}

// Payload do PUT /users/{id}: só os campos presentes são atualizados
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub position: Option<String>,
}
