//! Lesson repository functions. Lessons are owned elsewhere; games only
//! reference them.

use sea_orm::ConnectionTrait;

use crate::adapters::lessons_sea as lessons_adapter;
use crate::entities::lessons;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct Lesson {
    pub id: i64,
    pub title: String,
    pub created_by: Option<i64>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
) -> Result<Option<Lesson>, DomainError> {
    let lesson = lessons_adapter::find_by_id(conn, lesson_id).await?;
    Ok(lesson.map(Lesson::from))
}

/// Load a lesson or fail with `NotFound(Lesson)`.
pub async fn require_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
) -> Result<Lesson, DomainError> {
    let lesson = lessons_adapter::require_lesson(conn, lesson_id).await?;
    Ok(Lesson::from(lesson))
}

pub async fn create_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: &str,
    created_by: Option<i64>,
) -> Result<Lesson, DomainError> {
    let mut dto = lessons_adapter::LessonCreate::new(title);
    if let Some(user_id) = created_by {
        dto = dto.by(user_id);
    }
    let lesson = lessons_adapter::create_lesson(conn, dto).await?;
    Ok(Lesson::from(lesson))
}

impl From<lessons::Model> for Lesson {
    fn from(model: lessons::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            created_by: model.created_by,
        }
    }
}
