// src/services/mod.rs
pub mod auth_service;
pub mod replacement_service;
pub mod schedule_service;
pub mod student_service;
pub mod user_service;

/// Violação de UNIQUE no SQLite (códigos comuns: 19, 2067, 1555).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        db_err
            .code()
            .map_or(false, |c| c == "19" || c == "2067" || c == "1555")
    } else {
        false
    }
}

/// Violação de FOREIGN KEY no SQLite (códigos comuns: 19, 787).
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        db_err.code().map_or(false, |c| c == "19" || c == "787")
    } else {
        false
    }
}
