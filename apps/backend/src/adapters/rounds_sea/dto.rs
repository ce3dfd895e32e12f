//! DTOs for rounds_sea adapter.

/// DTO for creating a round row.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub game_id: i64,
    pub round_no: i16,
    pub prompt: Option<String>,
    pub blank_position: Option<i32>,
}
