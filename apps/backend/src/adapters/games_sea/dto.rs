//! DTOs for games_sea adapter.

use crate::entities::games::GameVariant;

/// DTO for creating a new game header.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub lesson_id: i64,
    pub variant: GameVariant,
    pub total_rounds: i16,
    pub created_by: Option<i64>,
}

impl GameCreate {
    pub fn new(lesson_id: i64, variant: GameVariant, total_rounds: i16) -> Self {
        Self {
            lesson_id,
            variant,
            total_rounds,
            created_by: None,
        }
    }

    pub fn by(mut self, user_id: Option<i64>) -> Self {
        self.created_by = user_id;
        self
    }
}

/// DTO for rewriting the header of an existing game.
#[derive(Debug, Clone)]
pub struct GameUpdateHeader {
    pub id: i64,
    pub total_rounds: i16,
}
