//! Pool construction and schema bootstrap.

use std::str::FromStr;
use std::time::Duration;

use migration::{count_applied_migrations, migrate, MigrationCommand};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, trace};

use crate::config::db::{
    make_conn_spec, validate_db_config, ConnectionSettings, DbKind, DbOwner, DbSettings,
    RuntimeEnv,
};
use crate::error::AppError;
use crate::logging::pii::Redacted;

/// Ordered session statements run on every new pooled connection.
fn build_session_statements(settings: &DbSettings) -> Vec<String> {
    match settings {
        DbSettings::Sqlite => vec!["PRAGMA foreign_keys = ON;".to_string()],
        DbSettings::Postgres {
            app_name,
            statement_timeout,
        } => vec![
            format!("SET application_name = '{}';", app_name.replace('\'', "''")),
            "SET timezone = 'UTC';".to_string(),
            format!(
                "SET statement_timeout = '{}';",
                statement_timeout.replace('\'', "''")
            ),
        ],
    }
}

fn config_err(what: &str, e: impl std::fmt::Display) -> AppError {
    AppError::config(format!("{what}: {}", Redacted(&e.to_string())))
}

/// Application pool with per-connection session settings.
pub async fn build_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
    pool_cfg: &ConnectionSettings,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, db_kind, DbOwner::App)?;
    let statements = build_session_statements(&pool_cfg.db_settings);

    match db_kind {
        DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| config_err("invalid SQLite connection options", e))?;

            // The database lives inside its only connection: never let the
            // pool retire it.
            let pool = SqlitePoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                .idle_timeout(None)
                .max_lifetime(None)
                .after_connect(move |conn, _meta| {
                    let statements = statements.clone();
                    Box::pin(async move {
                        for stmt in &statements {
                            sqlx::query(stmt).execute(&mut *conn).await?;
                        }
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| config_err("failed to create SQLite connection pool", e))?;

            info!(
                engine = "sqlite",
                path = %url,
                min = pool_cfg.pool_min,
                max = pool_cfg.pool_max,
                acquire_timeout_ms = pool_cfg.acquire_timeout_ms,
                "pool=create"
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        DbKind::Postgres => {
            let pool = PgPoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                .idle_timeout(Duration::from_secs(30))
                .after_connect(move |conn, _meta| {
                    let statements = statements.clone();
                    Box::pin(async move {
                        for stmt in &statements {
                            sqlx::query(stmt).execute(&mut *conn).await?;
                        }
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect(&url)
                .await
                .map_err(|e| config_err("failed to connect to Postgres", e))?;

            info!(
                engine = "postgres",
                min = pool_cfg.pool_min,
                max = pool_cfg.pool_max,
                acquire_timeout_ms = pool_cfg.acquire_timeout_ms,
                "pool=create"
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(pool))
        }
    }
}

/// Single-connection owner pool used for migrations (Postgres only).
pub async fn build_admin_pool(env: RuntimeEnv) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, DbKind::Postgres, DbOwner::Owner)?;

    let mut opt = ConnectOptions::new(url);
    opt.min_connections(1)
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(2))
        .sqlx_logging(false);

    Database::connect(opt)
        .await
        .map_err(|e| config_err("failed to connect to Postgres (admin pool)", e))
}

/// Build the application pool *and* guarantee the schema is current.
///
/// - SqliteMemory: build the one-connection pool, migrate on it, return it.
/// - Postgres: migrate through the owner pool, then build the app pool.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    validate_db_config(env, db_kind)?;
    let pool_cfg = ConnectionSettings::from_env(db_kind)?;

    info!(env = ?env, db_kind = ?db_kind, pid = std::process::id(), "bootstrap=start");

    let db = match db_kind {
        DbKind::SqliteMemory => {
            let pool = build_pool(env, db_kind, &pool_cfg).await?;
            migrate(&pool, MigrationCommand::Up)
                .await
                .map_err(|e| config_err("migration failed", e))?;
            pool
        }
        DbKind::Postgres => {
            let admin = build_admin_pool(env).await?;
            migrate(&admin, MigrationCommand::Up)
                .await
                .map_err(|e| config_err("migration failed", e))?;
            // Best effort: the pool closes on drop anyway.
            let _ = admin.close().await;
            build_pool(env, db_kind, &pool_cfg).await?
        }
    };

    let applied = count_applied_migrations(&db).await.unwrap_or(0);
    info!(applied, "bootstrap=ready");
    Ok(db)
}
