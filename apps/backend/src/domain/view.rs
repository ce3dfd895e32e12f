//! Canonical nested representation of a stored game.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::spec::{
    AnswerChoice, FillBlankRound, GameSpec, MatchItem, MatchPair, MatchingRound,
    MultipleChoiceRound, RoundsSpec,
};
use super::variant::GameVariant;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub id: i64,
    pub lesson_id: i64,
    pub total_rounds: u32,
    pub created_by: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(flatten)]
    pub rounds: RoundsView,
}

/// Rounds ordered by round number, tagged with the game's variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "rounds", rename_all = "snake_case")]
pub enum RoundsView {
    FillBlank(Vec<FillBlankRoundView>),
    Matching(Vec<MatchingRoundView>),
    MultipleChoice(Vec<MultipleChoiceRoundView>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBlankRoundView {
    pub id: i64,
    pub round_no: u32,
    pub prompt: String,
    pub blank_position: u32,
    pub choices: Vec<ChoiceView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceRoundView {
    pub id: i64,
    pub round_no: u32,
    pub question: String,
    pub choices: Vec<ChoiceView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingRoundView {
    pub id: i64,
    pub round_no: u32,
    pub prompt: Option<String>,
    pub left: Vec<ChoiceView>,
    pub right: Vec<ChoiceView>,
    /// Unordered; a set so comparisons ignore storage order
    pub matches: BTreeSet<MatchView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceView {
    pub id: i64,
    pub position: u32,
    pub text: Option<String>,
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub left_choice_id: i64,
    pub right_choice_id: i64,
}

impl RoundsView {
    pub fn variant(&self) -> GameVariant {
        match self {
            RoundsView::FillBlank(_) => GameVariant::FillBlank,
            RoundsView::Matching(_) => GameVariant::Matching,
            RoundsView::MultipleChoice(_) => GameVariant::MultipleChoice,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RoundsView::FillBlank(r) => r.len(),
            RoundsView::Matching(r) => r.len(),
            RoundsView::MultipleChoice(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl GameView {
    pub fn variant(&self) -> GameVariant {
        self.rounds.variant()
    }

    /// Editable specification of this game: positions preserved, matches
    /// re-expressed as indices into the displayed left/right lists.
    pub fn to_spec(&self) -> GameSpec {
        let total_rounds = self.total_rounds;
        match &self.rounds {
            RoundsView::FillBlank(rounds) => GameSpec::FillBlank(RoundsSpec {
                total_rounds,
                rounds: rounds
                    .iter()
                    .map(|r| FillBlankRound {
                        prompt: r.prompt.clone(),
                        choices: r.choices.iter().map(answer_choice).collect(),
                    })
                    .collect(),
            }),
            RoundsView::MultipleChoice(rounds) => GameSpec::MultipleChoice(RoundsSpec {
                total_rounds,
                rounds: rounds
                    .iter()
                    .map(|r| MultipleChoiceRound {
                        question: r.question.clone(),
                        choices: r.choices.iter().map(answer_choice).collect(),
                    })
                    .collect(),
            }),
            RoundsView::Matching(rounds) => GameSpec::Matching(RoundsSpec {
                total_rounds,
                rounds: rounds.iter().map(MatchingRoundView::to_spec).collect(),
            }),
        }
    }
}

impl MatchingRoundView {
    fn to_spec(&self) -> MatchingRound {
        let index_of = |side: &[ChoiceView], id: i64| side.iter().position(|c| c.id == id);

        let mut matches: Vec<MatchPair> = self
            .matches
            .iter()
            .filter_map(|m| {
                Some(MatchPair::new(
                    index_of(&self.left, m.left_choice_id)?,
                    index_of(&self.right, m.right_choice_id)?,
                ))
            })
            .collect();
        matches.sort();

        MatchingRound {
            prompt: self.prompt.clone(),
            left: self.left.iter().map(match_item).collect(),
            right: self.right.iter().map(match_item).collect(),
            matches,
        }
    }
}

fn answer_choice(c: &ChoiceView) -> AnswerChoice {
    AnswerChoice {
        text: c.text.clone(),
        media_url: c.media_url.clone(),
        position: Some(c.position),
        is_correct: c.is_correct.unwrap_or(false),
    }
}

fn match_item(c: &ChoiceView) -> MatchItem {
    MatchItem {
        text: c.text.clone(),
        media_url: c.media_url.clone(),
        position: Some(c.position),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn choice(id: i64, position: u32, text: &str) -> ChoiceView {
        ChoiceView {
            id,
            position,
            text: Some(text.into()),
            media_url: None,
            is_correct: None,
        }
    }

    fn matching_view() -> GameView {
        GameView {
            id: 7,
            lesson_id: 3,
            total_rounds: 1,
            created_by: None,
            created_at: datetime!(2025-03-01 12:00 UTC),
            updated_at: datetime!(2025-03-01 12:00 UTC),
            rounds: RoundsView::Matching(vec![MatchingRoundView {
                id: 11,
                round_no: 1,
                prompt: Some("Pair the animals".into()),
                left: vec![choice(20, 1, "dog"), choice(21, 2, "cat")],
                right: vec![choice(30, 1, "gato"), choice(31, 2, "perro")],
                matches: [
                    MatchView {
                        left_choice_id: 20,
                        right_choice_id: 31,
                    },
                    MatchView {
                        left_choice_id: 21,
                        right_choice_id: 30,
                    },
                ]
                .into_iter()
                .collect(),
            }]),
        }
    }

    #[test]
    fn matching_to_spec_uses_display_indices() {
        let GameSpec::Matching(spec) = matching_view().to_spec() else {
            panic!("expected matching spec");
        };
        let round = &spec.rounds[0];
        assert_eq!(spec.total_rounds, 1);
        assert_eq!(round.prompt.as_deref(), Some("Pair the animals"));
        assert_eq!(round.left[1].position, Some(2));
        assert_eq!(round.matches, vec![MatchPair::new(0, 1), MatchPair::new(1, 0)]);
    }

    #[test]
    fn serialized_view_carries_variant_and_rounds() {
        let value = serde_json::to_value(matching_view()).unwrap();
        assert_eq!(value["variant"], "matching");
        assert_eq!(value["lessonId"], 3);
        assert_eq!(value["createdAt"], "2025-03-01T12:00:00Z");
        assert_eq!(value["rounds"][0]["matches"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["rounds"][0]["left"][0]["text"], "dog");
    }
}
