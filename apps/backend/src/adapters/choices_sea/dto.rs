//! DTOs for choices_sea adapter.

use crate::entities::round_choices::ChoiceCollection;

/// DTO for creating a choice row.
#[derive(Debug, Clone)]
pub struct ChoiceCreate {
    pub round_id: i64,
    pub collection: ChoiceCollection,
    pub position: i16,
    pub text: Option<String>,
    pub media_url: Option<String>,
    pub is_correct: Option<bool>,
}
