//! SeaORM adapter for lessons - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, Set};

use crate::entities::lessons;
use crate::infra::db_errors::{not_found_err, LESSON_NOT_FOUND};

pub mod dto;

pub use dto::LessonCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
) -> Result<Option<lessons::Model>, sea_orm::DbErr> {
    lessons::Entity::find_by_id(lesson_id).one(conn).await
}

/// Find lesson by ID or return the structured `LESSON_NOT_FOUND` error.
pub async fn require_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
) -> Result<lessons::Model, sea_orm::DbErr> {
    find_by_id(conn, lesson_id)
        .await?
        .ok_or_else(|| not_found_err(LESSON_NOT_FOUND, lesson_id))
}

pub async fn create_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: LessonCreate,
) -> Result<lessons::Model, sea_orm::DbErr> {
    let lesson = lessons::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        created_by: Set(dto.created_by),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    lesson.insert(conn).await
}
