use crate::config::db::{db_kind_from_env, DbKind, RuntimeEnv};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for `AppState` (used by tests and by embedding binaries).
#[derive(Debug, Default)]
pub struct StateBuilder {
    env: Option<RuntimeEnv>,
    db_kind: Option<DbKind>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to a database for `env`; the engine comes from
    /// `GAMES_DB_KIND` unless `with_db_kind` overrides it.
    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = Some(env);
        self
    }

    pub fn with_db_kind(mut self, db_kind: DbKind) -> Self {
        self.db_kind = Some(db_kind);
        self
    }

    /// Without an environment the state has no database.
    pub async fn build(self) -> Result<AppState, AppError> {
        let Some(env) = self.env else {
            return Ok(AppState::without_db());
        };
        let db_kind = match self.db_kind {
            Some(kind) => kind,
            None => db_kind_from_env()?,
        };
        // single entrypoint: build + migrate
        let conn = bootstrap_db(env, db_kind).await?;
        Ok(AppState::new(conn, env, db_kind))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
