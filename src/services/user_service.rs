// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUserPayload, UpdateUserPayload, User, UserPublic},
    services::auth_service,
};
use sqlx::SqlitePool;

/// Posições aceites na tabela 'users'.
pub const DEFINED_POSITIONS: &[&str] = &["Coordenacao", "Preceptor"];

fn validate_position(position: &str) -> AppResult {
    if DEFINED_POSITIONS.iter().any(|p| *p == position) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "Posição inválida: '{}'. Use 'Coordenacao' ou 'Preceptor'.",
            position
        )))
    }
}

/// Busca um usuário pelo e-mail, incluindo o hash da senha (uso interno
/// da autenticação).
pub async fn find_by_email(db_pool: &SqlitePool, email: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, position
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(db_pool)
    .await?;

    Ok(user)
}

/// Busca um usuário pelo id, sem a coluna da senha.
pub async fn find_by_id(db_pool: &SqlitePool, id: i64) -> AppResult<Option<UserPublic>> {
    tracing::debug!("Buscando usuário por id: {}", id);
    let user = sqlx::query_as::<_, UserPublic>(
        r#"
        SELECT id, name, email, position
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?;

    Ok(user)
}

/// Busca todos os usuários (sem a senha, por segurança).
pub async fn find_all(db_pool: &SqlitePool) -> AppResult<Vec<UserPublic>> {
    tracing::debug!("Buscando todos os usuários...");
    let users = sqlx::query_as::<_, UserPublic>(
        r#"
        SELECT id, name, email, position
        FROM users
        ORDER BY id ASC
        "#,
    )
    .fetch_all(db_pool)
    .await?;

    tracing::debug!("Encontrados {} usuários.", users.len());
    Ok(users)
}

/// Cria um usuário. E-mail duplicado é `Conflict`; a senha é sempre
/// guardada como hash bcrypt.
pub async fn create(db_pool: &SqlitePool, payload: CreateUserPayload) -> AppResult<UserPublic> {
    tracing::info!("Tentando criar usuário: {}", payload.email);

    let position = payload
        .position
        .unwrap_or_else(|| "Preceptor".to_string());
    validate_position(&position)?;

    if find_by_email(db_pool, &payload.email).await?.is_some() {
        tracing::warn!("Falha ao criar usuário: e-mail '{}' já cadastrado.", payload.email);
        return Err(AppError::Conflict("Este e-mail já está cadastrado.".to_string()));
    }

    let password_hash = auth_service::hash_password(&payload.password).await?;

    let result = sqlx::query_as::<_, UserPublic>(
        r#"
        INSERT INTO users (name, email, password, position)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, email, position
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&password_hash)
    .bind(&position)
    .fetch_one(db_pool)
    .await;

    match result {
        Ok(user) => {
            tracing::info!("✅ Usuário '{}' criado com sucesso.", user.email);
            Ok(user)
        }
        // Duas criações concorrentes com o mesmo e-mail podem passar pela
        // verificação acima; a UNIQUE da tabela é a barreira final.
        Err(e) if super::is_unique_violation(&e) => {
            tracing::warn!("Falha ao criar usuário: e-mail '{}' já cadastrado.", payload.email);
            Err(AppError::Conflict("Este e-mail já está cadastrado.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Atualização parcial: só os campos presentes no payload sobrescrevem
/// os valores atuais; a senha só é re-hashada se uma nova for fornecida.
pub async fn update(
    db_pool: &SqlitePool,
    id: i64,
    payload: UpdateUserPayload,
) -> AppResult<UserPublic> {
    if payload.name.is_none()
        && payload.email.is_none()
        && payload.password.is_none()
        && payload.position.is_none()
    {
        return Err(AppError::BadRequest(
            "Pelo menos um campo (name, email, password ou position) deve ser fornecido."
                .to_string(),
        ));
    }

    if let Some(position) = payload.position.as_deref() {
        validate_position(position)?;
    }

    let password_hash = match payload.password.as_deref() {
        Some(raw) => Some(auth_service::hash_password(raw).await?),
        None => None,
    };

    let result = sqlx::query_as::<_, UserPublic>(
        r#"
        UPDATE users
        SET
            name = COALESCE(?, name),
            email = COALESCE(?, email),
            password = COALESCE(?, password),
            position = COALESCE(?, position)
        WHERE id = ?
        RETURNING id, name, email, position
        "#,
    )
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&password_hash)
    .bind(&payload.position)
    .bind(id)
    .fetch_optional(db_pool)
    .await;

    match result {
        Ok(Some(user)) => {
            tracing::info!("✅ Usuário {} atualizado com sucesso.", id);
            Ok(user)
        }
        Ok(None) => {
            tracing::warn!("Falha ao atualizar: usuário {} não encontrado.", id);
            Err(AppError::NotFound(format!("Usuário {} não encontrado.", id)))
        }
        Err(e) if super::is_unique_violation(&e) => {
            Err(AppError::Conflict("Este e-mail já está cadastrado.".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Remove um usuário. Devolve o número de linhas apagadas (0 quando o id
/// não existe). Usuários referenciados por alunos/agendamentos são
/// protegidos pelas FKs.
pub async fn delete(db_pool: &SqlitePool, id: i64) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(db_pool)
        .await;

    match result {
        Ok(done) => Ok(done.rows_affected()),
        Err(e) if super::is_foreign_key_violation(&e) => Err(AppError::Conflict(
            "Usuário vinculado a outros registros não pode ser removido.".to_string(),
        )),
        Err(e) => Err(e.into()),
    }
}
