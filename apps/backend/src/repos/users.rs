//! User repository functions; authors of games.

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Load a user or fail with `NotFound(User)`.
pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    let user = users_adapter::require_user(conn, user_id).await?;
    Ok(User::from(user))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, users_adapter::UserCreate::new(username)).await?;
    Ok(User::from(user))
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
        }
    }
}
