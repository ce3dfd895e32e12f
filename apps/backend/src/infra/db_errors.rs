//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos and services convert it into
//! `DomainError` here. Raw driver messages are only ever logged through the
//! redacting wrapper.

use sea_orm::{ConnAcquireErr, DbErr};
use tracing::{error, warn};

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::logging::pii::Redacted;

/// Prefixes of the structured not-found errors raised by adapters.
pub const GAME_NOT_FOUND: &str = "GAME_NOT_FOUND:";
pub const LESSON_NOT_FOUND: &str = "LESSON_NOT_FOUND:";
pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND:";

/// Structured not-found `DbErr` understood by [`map_db_err`].
pub fn not_found_err(prefix: &str, id: i64) -> DbErr {
    DbErr::Custom(format!("{prefix}{id}"))
}

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// First `table.column` of a SQLite "UNIQUE constraint failed: t.a, t.b" message.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = error_msg.find(MARKER)? + MARKER.len();
    error_msg[start..]
        .split_whitespace()
        .next()
        .map(|tc| tc.trim_end_matches(',').trim_end_matches('"'))
}

fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "games.lesson_id" | "games.variant" => Some((
            ConflictKind::GameSlotTaken,
            "Lesson already has a game of this variant",
        )),
        _ => None,
    }
}

fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_games_lesson_variant") {
        return Some((
            ConflictKind::GameSlotTaken,
            "Lesson already has a game of this variant",
        ));
    }
    None
}

fn parse_not_found(msg: &str) -> Option<DomainError> {
    let table = [
        (GAME_NOT_FOUND, NotFoundKind::Game, "Game"),
        (LESSON_NOT_FOUND, NotFoundKind::Lesson, "Lesson"),
        (USER_NOT_FOUND, NotFoundKind::User, "User"),
    ];
    for (prefix, kind, label) in table {
        if let Some(raw_id) = msg.strip_prefix(prefix) {
            let detail = match raw_id.parse::<i64>() {
                Ok(id) => format!("{label} {id} not found"),
                Err(_) => {
                    warn!(raw_error = %Redacted(msg), "Failed to parse not-found error");
                    format!("{label} not found")
                }
            };
            return Some(DomainError::not_found(kind, detail));
        }
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        DbErr::Custom(msg) => {
            if let Some(err) = parse_not_found(msg) {
                warn!(detail = %err, "Entity not found");
                return err;
            }
        }
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
            warn!(raw_error = %Redacted(&error_msg), "Database pool acquire timeout");
            return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }
        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(ConflictKind::Unique, "Unique constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed") {
        warn!(raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::ForeignKey,
            "Foreign key constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation(ValidationKind::Check, "Check constraint violation");
    }

    if mentions_sqlstate(&error_msg, "57014")
        || error_msg.contains("statement timeout")
        || error_msg.contains("timed out")
    {
        warn!(raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::RuntimeErr;

    use super::*;

    fn exec(msg: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(msg.to_string()))
    }

    #[test]
    fn structured_not_found_is_parsed() {
        assert_eq!(
            map_db_err(not_found_err(GAME_NOT_FOUND, 42)),
            DomainError::not_found(NotFoundKind::Game, "Game 42 not found")
        );
        assert_eq!(
            map_db_err(not_found_err(LESSON_NOT_FOUND, 7)),
            DomainError::not_found(NotFoundKind::Lesson, "Lesson 7 not found")
        );
        assert_eq!(
            map_db_err(DbErr::Custom("USER_NOT_FOUND:abc".into())),
            DomainError::not_found(NotFoundKind::User, "User not found")
        );
    }

    #[test]
    fn sqlite_slot_conflict_is_recognised() {
        let err = exec("UNIQUE constraint failed: games.lesson_id, games.variant");
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::GameSlotTaken, _)
        ));
    }

    #[test]
    fn postgres_slot_conflict_is_recognised() {
        let err = exec(
            "duplicate key value violates unique constraint \"ux_games_lesson_variant\"",
        );
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::GameSlotTaken, _)
        ));
    }

    #[test]
    fn other_unique_violations_are_generic() {
        let err = exec("UNIQUE constraint failed: round_matches.round_id, round_matches.left_choice_id");
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::Unique, _)
        ));
    }

    #[test]
    fn constraint_violations_are_validation() {
        assert!(matches!(
            map_db_err(exec("FOREIGN KEY constraint failed")),
            DomainError::Validation(ValidationKind::ForeignKey, _)
        ));
        assert!(matches!(
            map_db_err(exec("error returned from database: (code: 23514) new row violates check constraint")),
            DomainError::Validation(ValidationKind::Check, _)
        ));
    }

    #[test]
    fn pool_failures_are_infra() {
        assert_eq!(
            map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)),
            DomainError::infra(InfraErrorKind::Timeout, "Database timeout")
        );
        assert_eq!(
            map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::ConnectionClosed)),
            DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable")
        );
    }

    #[test]
    fn unknown_errors_fall_back_to_infra_other() {
        assert!(matches!(
            map_db_err(exec("disk I/O error")),
            DomainError::Infra(InfraErrorKind::Other(_), _)
        ));
    }
}
