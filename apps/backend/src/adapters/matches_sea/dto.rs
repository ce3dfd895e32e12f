//! DTOs for matches_sea adapter.

/// DTO for creating a match row between two stored choices.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub round_id: i64,
    pub left_choice_id: i64,
    pub right_choice_id: i64,
}
