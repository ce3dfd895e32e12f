//! DTOs for lessons_sea adapter.

/// DTO for creating a lesson.
#[derive(Debug, Clone)]
pub struct LessonCreate {
    pub title: String,
    pub created_by: Option<i64>,
}

impl LessonCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created_by: None,
        }
    }

    pub fn by(mut self, user_id: i64) -> Self {
        self.created_by = Some(user_id);
        self
    }
}
