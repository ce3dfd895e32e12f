//! SeaORM adapter for users - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, Set};

use crate::entities::users;
use crate::infra::db_errors::{not_found_err, USER_NOT_FOUND};

pub mod dto;

pub use dto::UserCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

/// Find user by ID or return the structured `USER_NOT_FOUND` error.
pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<users::Model, sea_orm::DbErr> {
    find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| not_found_err(USER_NOT_FOUND, user_id))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    user.insert(conn).await
}
