//! Test state helpers.
//!
//! `GAMES_TEST_DB_KIND` picks the engine (`sqlite-memory` by default,
//! `postgres` for the Test database). Every call builds a fresh pool; with
//! SQLite that is a fresh, migrated in-memory database.

use lesson_games::config::db::{DbKind, RuntimeEnv};
use lesson_games::infra::state::build_state;
use lesson_games::{AppError, AppState, GameService};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection};

pub fn test_db_kind() -> Result<DbKind, AppError> {
    match std::env::var("GAMES_TEST_DB_KIND") {
        Ok(raw) if !raw.trim().is_empty() => raw.parse(),
        _ => Ok(DbKind::SqliteMemory),
    }
}

pub async fn test_state() -> Result<AppState, AppError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db_kind(test_db_kind()?)
        .build()
        .await
}

/// Service and raw connection of a test state.
pub fn parts(state: &AppState) -> (GameService, DatabaseConnection) {
    let games = state.games().expect("test state has a database");
    let db = games.db().clone();
    (games, db)
}

pub fn is_sqlite(db: &DatabaseConnection) -> bool {
    db.get_database_backend() == DatabaseBackend::Sqlite
}
