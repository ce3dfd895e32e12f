use sea_orm::DatabaseConnection;

use crate::config::db::{DbKind, RuntimeEnv};
use crate::services::game_definitions::GameService;

/// Shared resources for whatever embeds the core.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Option<DatabaseConnection>,
    /// Environment and engine the pool was built for, if any
    pub profile: Option<(RuntimeEnv, DbKind)>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, env: RuntimeEnv, db_kind: DbKind) -> Self {
        Self {
            db: Some(db),
            profile: Some((env, db_kind)),
        }
    }

    /// State without a database; every store operation reports `DbUnavailable`.
    pub fn without_db() -> Self {
        Self {
            db: None,
            profile: None,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    /// Game definition service over this state's pool.
    pub fn games(&self) -> Option<GameService> {
        self.db.clone().map(GameService::new)
    }
}
