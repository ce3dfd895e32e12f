//! Author-facing exercise specifications.
//!
//! A [`GameSpec`] is what an editor submits: the variant, the declared number
//! of rounds and the rounds themselves. Choices reference each other only by
//! their index in the submitted lists; storage identifiers never appear here.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::variant::GameVariant;

/// Authoring limit on rounds per game.
pub const MAX_ROUNDS: u32 = 10;
/// Minimum entries in any choice collection.
pub const MIN_CHOICES: usize = 2;
/// Upper bound on multiple-choice options.
pub const MAX_MULTIPLE_CHOICE_CHOICES: usize = 6;
/// A blank is a maximal run of this character inside a fill-blank prompt.
pub const BLANK_MARKER: char = '_';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum GameSpec {
    FillBlank(RoundsSpec<FillBlankRound>),
    Matching(RoundsSpec<MatchingRound>),
    MultipleChoice(RoundsSpec<MultipleChoiceRound>),
}

/// Declared round count plus the ordered rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundsSpec<R> {
    pub total_rounds: u32,
    pub rounds: Vec<R>,
}

impl<R> RoundsSpec<R> {
    /// Spec whose declared count matches the supplied rounds.
    pub fn new(rounds: Vec<R>) -> Self {
        Self {
            total_rounds: u32::try_from(rounds.len()).unwrap_or(u32::MAX),
            rounds,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillBlankRound {
    /// Sentence with exactly one blank, e.g. `"The cat _ on the mat"`
    pub prompt: String,
    pub choices: Vec<AnswerChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceRound {
    pub question: String,
    pub choices: Vec<AnswerChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingRound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub left: Vec<MatchItem>,
    pub right: Vec<MatchItem>,
    pub matches: Vec<MatchPair>,
}

/// Option of a fill-blank or multiple-choice round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerChoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    /// 1-based display position; list order when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default)]
    pub is_correct: bool,
}

impl AnswerChoice {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn media(url: impl Into<String>) -> Self {
        Self {
            media_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn correct(mut self) -> Self {
        self.is_correct = true;
        self
    }

    pub fn at(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }
}

/// Entry of a matching round's left or right column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl MatchItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn media(url: impl Into<String>) -> Self {
        Self {
            media_url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn at(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }
}

/// Correct pairing, as indices into the round's `left` and `right` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: usize,
    pub right: usize,
}

impl MatchPair {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }
}

/// Collection a choice is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceCollection {
    Options,
    Left,
    Right,
}

impl fmt::Display for ChoiceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChoiceCollection::Options => "options",
            ChoiceCollection::Left => "left",
            ChoiceCollection::Right => "right",
        })
    }
}

impl GameSpec {
    pub fn variant(&self) -> GameVariant {
        match self {
            GameSpec::FillBlank(_) => GameVariant::FillBlank,
            GameSpec::Matching(_) => GameVariant::Matching,
            GameSpec::MultipleChoice(_) => GameVariant::MultipleChoice,
        }
    }

    pub fn total_rounds(&self) -> u32 {
        match self {
            GameSpec::FillBlank(s) => s.total_rounds,
            GameSpec::Matching(s) => s.total_rounds,
            GameSpec::MultipleChoice(s) => s.total_rounds,
        }
    }

    pub fn round_count(&self) -> usize {
        match self {
            GameSpec::FillBlank(s) => s.rounds.len(),
            GameSpec::Matching(s) => s.rounds.len(),
            GameSpec::MultipleChoice(s) => s.rounds.len(),
        }
    }
}
