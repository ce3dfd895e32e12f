use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Runtime environment; selects the database name and its safety rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Enforces a database name ending in `_test`
    Test,
}

/// Storage engine behind the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    /// Private in-memory SQLite database, one connection for the pool's lifetime
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(DbKind::Postgres),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config(format!(
                "unknown database kind '{other}' (expected 'postgres' or 'sqlite-memory')"
            ))),
        }
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (DML only)
    App,
    /// Owner-level access (DDL, used for migrations)
    Owner,
}

/// Per-engine session settings applied on every new pooled connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbSettings {
    Postgres {
        app_name: String,
        statement_timeout: String,
    },
    Sqlite,
}

/// Pool sizing plus session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
    pub db_settings: DbSettings,
}

const DEFAULT_POOL_MIN: u32 = 1;
const DEFAULT_POOL_MAX: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_STATEMENT_TIMEOUT: &str = "15s";
const APP_NAME: &str = "lesson-games";

impl ConnectionSettings {
    /// Read pool settings from the environment.
    ///
    /// The in-memory SQLite database lives inside its single connection, so
    /// its pool is pinned to exactly one connection whatever the environment
    /// says.
    pub fn from_env(db_kind: DbKind) -> Result<Self, AppError> {
        let acquire_timeout_ms =
            parse_var::<u64>("GAMES_DB_ACQUIRE_TIMEOUT_MS")?.unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_MS);

        match db_kind {
            DbKind::SqliteMemory => Ok(Self {
                pool_min: 1,
                pool_max: 1,
                acquire_timeout_ms,
                db_settings: DbSettings::Sqlite,
            }),
            DbKind::Postgres => {
                let pool_min = parse_var::<u32>("GAMES_DB_POOL_MIN")?.unwrap_or(DEFAULT_POOL_MIN);
                let pool_max = parse_var::<u32>("GAMES_DB_POOL_MAX")?.unwrap_or(DEFAULT_POOL_MAX);
                if pool_max == 0 || pool_min > pool_max {
                    return Err(AppError::config(format!(
                        "invalid pool bounds: GAMES_DB_POOL_MIN={pool_min} GAMES_DB_POOL_MAX={pool_max}"
                    )));
                }
                let statement_timeout = env::var("GAMES_DB_STATEMENT_TIMEOUT")
                    .unwrap_or_else(|_| DEFAULT_STATEMENT_TIMEOUT.to_string());

                Ok(Self {
                    pool_min,
                    pool_max,
                    acquire_timeout_ms,
                    db_settings: DbSettings::Postgres {
                        app_name: APP_NAME.to_string(),
                        statement_timeout,
                    },
                })
            }
        }
    }
}

/// Database kind from `GAMES_DB_KIND`; Postgres when unset.
pub fn db_kind_from_env() -> Result<DbKind, AppError> {
    match env::var("GAMES_DB_KIND") {
        Ok(raw) => raw.parse(),
        Err(_) => Ok(DbKind::Postgres),
    }
}

/// Connection string for the given environment, engine and owner.
pub fn make_conn_spec(env: RuntimeEnv, db_kind: DbKind, owner: DbOwner) -> Result<String, AppError> {
    match db_kind {
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbKind::Postgres => db_url(env, owner),
    }
}

/// Builds a Postgres URL from environment variables based on environment and owner
pub fn db_url(env: RuntimeEnv, owner: DbOwner) -> Result<String, AppError> {
    let host = host();
    let port = port()?;
    let db_name = db_name(env)?;
    let (username, password) = credentials(owner)?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Check everything `make_conn_spec` needs before any pool is built.
pub fn validate_db_config(env: RuntimeEnv, db_kind: DbKind) -> Result<(), AppError> {
    if db_kind == DbKind::SqliteMemory {
        return Ok(());
    }
    db_name(env)?;
    credentials(DbOwner::App)?;
    credentials(DbOwner::Owner)?;
    port()?;
    Ok(())
}

fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

fn port() -> Result<u16, AppError> {
    Ok(parse_var::<u16>("POSTGRES_PORT")?.unwrap_or(5432))
}

fn db_name(env: RuntimeEnv) -> Result<String, AppError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test environment requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("GAMES_OWNER_USER")?,
            must_var("GAMES_OWNER_PASSWORD")?,
        )),
    }
}

fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
        }),
        Err(_) => Ok(None),
    }
}
