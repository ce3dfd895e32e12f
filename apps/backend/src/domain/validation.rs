//! Structural and semantic rules for exercise specifications.
//!
//! Validation is a pure function of the specification. Its only success
//! value is [`ValidatedGame`], a write plan with resolved display positions
//! and derived blank offsets; the persistence layer accepts nothing else.

use std::fmt;

use thiserror::Error;

use super::matching::{validate_matching, MatchingError};
use super::spec::{
    AnswerChoice, ChoiceCollection, FillBlankRound, GameSpec, MatchItem, MatchPair,
    MatchingRound, MultipleChoiceRound, RoundsSpec, BLANK_MARKER, MAX_MULTIPLE_CHOICE_CHOICES,
    MAX_ROUNDS, MIN_CHOICES,
};
use super::variant::GameVariant;

/// The rule a specification broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecRule {
    #[error("declared {declared} rounds but supplied {supplied}")]
    RoundCountMismatch { declared: u32, supplied: usize },
    #[error("round count {0} is outside 1..={max}", max = MAX_ROUNDS)]
    RoundCountOutOfRange(u32),
    #[error("expected a {expected} game but got {actual}")]
    VariantMismatch {
        expected: GameVariant,
        actual: GameVariant,
    },
    #[error("prompt must contain exactly one blank, found {0}")]
    BlankCount(usize),
    #[error("question must not be empty")]
    EmptyQuestion,
    #[error("{collection} needs at least {min} choices, got {got}")]
    TooFewChoices {
        collection: ChoiceCollection,
        min: usize,
        got: usize,
    },
    #[error("{collection} allows at most {max} choices, got {got}")]
    TooManyChoices {
        collection: ChoiceCollection,
        max: usize,
        got: usize,
    },
    #[error("exactly one choice must be correct, found {0}")]
    CorrectCount(usize),
    #[error("{collection} choice {index} needs text or a media reference")]
    EmptyChoice {
        collection: ChoiceCollection,
        index: usize,
    },
    #[error("choice {index} needs text")]
    ChoiceTextRequired { index: usize },
    #[error("{collection} positions must be given for every choice or for none")]
    MixedPositions { collection: ChoiceCollection },
    #[error("{collection} positions must be a permutation of 1..={len}")]
    InvalidPositions {
        collection: ChoiceCollection,
        len: usize,
    },
    #[error("matching: {0}")]
    Matching(#[from] MatchingError),
}

/// A rejected specification: the offending round (0-based, `None` for
/// game-level rules) and the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecViolation {
    pub round: Option<usize>,
    pub rule: SpecRule,
}

impl SpecViolation {
    pub fn game(rule: SpecRule) -> Self {
        Self { round: None, rule }
    }

    pub fn round(index: usize, rule: SpecRule) -> Self {
        Self {
            round: Some(index),
            rule,
        }
    }
}

impl fmt::Display for SpecViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.round {
            Some(i) => write!(f, "round {i}: {}", self.rule),
            None => write!(f, "{}", self.rule),
        }
    }
}

impl std::error::Error for SpecViolation {}

/// A specification that passed every rule, ready to be written.
///
/// Only [`validate`] and [`validate_for`] construct this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedGame {
    variant: GameVariant,
    total_rounds: u16,
    rounds: Vec<PlannedRound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRound {
    /// 1-based
    pub round_no: u16,
    /// Fill-blank prompt, question, or optional matching instructions
    pub prompt: Option<String>,
    pub blank_position: Option<u32>,
    pub content: PlannedContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedContent {
    /// OPTIONS collection, in submitted order
    Options(Vec<PlannedChoice>),
    /// LEFT and RIGHT collections in submitted order; matches index into them
    Pairs {
        left: Vec<PlannedChoice>,
        right: Vec<PlannedChoice>,
        matches: Vec<MatchPair>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChoice {
    pub text: Option<String>,
    pub media_url: Option<String>,
    /// Resolved 1-based display position
    pub position: u16,
    /// `None` for matching entries
    pub is_correct: Option<bool>,
}

impl ValidatedGame {
    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    pub fn total_rounds(&self) -> u16 {
        self.total_rounds
    }

    pub fn rounds(&self) -> &[PlannedRound] {
        &self.rounds
    }

    /// Canonical specification of this plan: choices in display order with
    /// explicit positions, blank strings dropped, match indices re-expressed
    /// against the display order and sorted by left index.
    pub fn as_spec(&self) -> GameSpec {
        let total_rounds = u32::from(self.total_rounds);
        match self.variant {
            GameVariant::FillBlank => GameSpec::FillBlank(RoundsSpec {
                total_rounds,
                rounds: self
                    .rounds
                    .iter()
                    .map(|r| FillBlankRound {
                        prompt: r.prompt.clone().unwrap_or_default(),
                        choices: r.content.answer_choices(),
                    })
                    .collect(),
            }),
            GameVariant::MultipleChoice => GameSpec::MultipleChoice(RoundsSpec {
                total_rounds,
                rounds: self
                    .rounds
                    .iter()
                    .map(|r| MultipleChoiceRound {
                        question: r.prompt.clone().unwrap_or_default(),
                        choices: r.content.answer_choices(),
                    })
                    .collect(),
            }),
            GameVariant::Matching => GameSpec::Matching(RoundsSpec {
                total_rounds,
                rounds: self
                    .rounds
                    .iter()
                    .map(|r| r.content.matching_round(r.prompt.clone()))
                    .collect(),
            }),
        }
    }
}

impl PlannedContent {
    fn answer_choices(&self) -> Vec<AnswerChoice> {
        let PlannedContent::Options(choices) = self else {
            return Vec::new();
        };
        display_order(choices)
            .into_iter()
            .map(|i| {
                let c = &choices[i];
                AnswerChoice {
                    text: c.text.clone(),
                    media_url: c.media_url.clone(),
                    position: Some(u32::from(c.position)),
                    is_correct: c.is_correct.unwrap_or(false),
                }
            })
            .collect()
    }

    fn matching_round(&self, prompt: Option<String>) -> MatchingRound {
        let PlannedContent::Pairs {
            left,
            right,
            matches,
        } = self
        else {
            return MatchingRound {
                prompt,
                left: Vec::new(),
                right: Vec::new(),
                matches: Vec::new(),
            };
        };

        let left_order = display_order(left);
        let right_order = display_order(right);
        let left_rank = ranks(&left_order);
        let right_rank = ranks(&right_order);

        let mut pairs: Vec<MatchPair> = matches
            .iter()
            .map(|p| MatchPair::new(left_rank[p.left], right_rank[p.right]))
            .collect();
        pairs.sort();

        MatchingRound {
            prompt,
            left: left_order.iter().map(|&i| match_item(&left[i])).collect(),
            right: right_order.iter().map(|&i| match_item(&right[i])).collect(),
            matches: pairs,
        }
    }
}

fn match_item(c: &PlannedChoice) -> MatchItem {
    MatchItem {
        text: c.text.clone(),
        media_url: c.media_url.clone(),
        position: Some(u32::from(c.position)),
    }
}

/// Submitted indices sorted by resolved position.
fn display_order(choices: &[PlannedChoice]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..choices.len()).collect();
    order.sort_by_key(|&i| choices[i].position);
    order
}

/// Inverse of `display_order`: submitted index -> display index.
fn ranks(order: &[usize]) -> Vec<usize> {
    let mut rank = vec![0; order.len()];
    for (display, &submitted) in order.iter().enumerate() {
        rank[submitted] = display;
    }
    rank
}

/// Validate a specification of any variant.
pub fn validate(spec: &GameSpec) -> Result<ValidatedGame, SpecViolation> {
    let total_rounds = check_round_count(spec.total_rounds(), spec.round_count())?;

    let rounds = match spec {
        GameSpec::FillBlank(s) => plan_rounds(&s.rounds, plan_fill_blank)?,
        GameSpec::MultipleChoice(s) => plan_rounds(&s.rounds, plan_multiple_choice)?,
        GameSpec::Matching(s) => plan_rounds(&s.rounds, plan_matching)?,
    };

    Ok(ValidatedGame {
        variant: spec.variant(),
        total_rounds,
        rounds,
    })
}

/// Validate a specification that must be of `expected` variant.
pub fn validate_for(
    expected: GameVariant,
    spec: &GameSpec,
) -> Result<ValidatedGame, SpecViolation> {
    let actual = spec.variant();
    if actual != expected {
        return Err(SpecViolation::game(SpecRule::VariantMismatch { expected, actual }));
    }
    validate(spec)
}

fn check_round_count(declared: u32, supplied: usize) -> Result<u16, SpecViolation> {
    if usize::try_from(declared).ok() != Some(supplied) {
        return Err(SpecViolation::game(SpecRule::RoundCountMismatch {
            declared,
            supplied,
        }));
    }
    if !(1..=MAX_ROUNDS).contains(&declared) {
        return Err(SpecViolation::game(SpecRule::RoundCountOutOfRange(declared)));
    }
    u16::try_from(declared)
        .map_err(|_| SpecViolation::game(SpecRule::RoundCountOutOfRange(declared)))
}

/// Prompt, blank offset and content of one round.
type Plan = (Option<String>, Option<u32>, PlannedContent);

fn plan_rounds<R>(
    rounds: &[R],
    plan: fn(&R) -> Result<Plan, SpecRule>,
) -> Result<Vec<PlannedRound>, SpecViolation> {
    rounds
        .iter()
        .enumerate()
        .map(|(index, round)| {
            let (prompt, blank_position, content) =
                plan(round).map_err(|rule| SpecViolation::round(index, rule))?;
            Ok(PlannedRound {
                // bounded by MAX_ROUNDS
                round_no: index as u16 + 1,
                prompt,
                blank_position,
                content,
            })
        })
        .collect()
}

fn plan_fill_blank(round: &FillBlankRound) -> Result<Plan, SpecRule> {
    let blank = find_blank(&round.prompt)?;
    check_min(ChoiceCollection::Options, round.choices.len())?;

    for (index, c) in round.choices.iter().enumerate() {
        if present(&c.text).is_none() && present(&c.media_url).is_none() {
            return Err(SpecRule::EmptyChoice {
                collection: ChoiceCollection::Options,
                index,
            });
        }
    }
    check_single_correct(&round.choices)?;

    let choices = plan_answer_choices(&round.choices)?;
    Ok((
        Some(round.prompt.clone()),
        Some(blank),
        PlannedContent::Options(choices),
    ))
}

fn plan_multiple_choice(round: &MultipleChoiceRound) -> Result<Plan, SpecRule> {
    if round.question.trim().is_empty() {
        return Err(SpecRule::EmptyQuestion);
    }
    let got = round.choices.len();
    check_min(ChoiceCollection::Options, got)?;
    if got > MAX_MULTIPLE_CHOICE_CHOICES {
        return Err(SpecRule::TooManyChoices {
            collection: ChoiceCollection::Options,
            max: MAX_MULTIPLE_CHOICE_CHOICES,
            got,
        });
    }

    for (index, c) in round.choices.iter().enumerate() {
        if present(&c.text).is_none() {
            return Err(SpecRule::ChoiceTextRequired { index });
        }
    }
    check_single_correct(&round.choices)?;

    let choices = plan_answer_choices(&round.choices)?;
    Ok((
        Some(round.question.clone()),
        None,
        PlannedContent::Options(choices),
    ))
}

fn plan_matching(round: &MatchingRound) -> Result<Plan, SpecRule> {
    check_min(ChoiceCollection::Left, round.left.len())?;
    check_min(ChoiceCollection::Right, round.right.len())?;

    let left = plan_match_items(ChoiceCollection::Left, &round.left)?;
    let right = plan_match_items(ChoiceCollection::Right, &round.right)?;

    validate_matching(round.left.len(), round.right.len(), &round.matches)?;

    Ok((
        present(&round.prompt),
        None,
        PlannedContent::Pairs {
            left,
            right,
            matches: round.matches.clone(),
        },
    ))
}

fn plan_answer_choices(choices: &[AnswerChoice]) -> Result<Vec<PlannedChoice>, SpecRule> {
    let positions: Vec<Option<u32>> = choices.iter().map(|c| c.position).collect();
    let resolved = resolve_positions(ChoiceCollection::Options, &positions)?;

    Ok(choices
        .iter()
        .zip(resolved)
        .map(|(c, position)| PlannedChoice {
            text: present(&c.text),
            media_url: present(&c.media_url),
            position,
            is_correct: Some(c.is_correct),
        })
        .collect())
}

fn plan_match_items(
    collection: ChoiceCollection,
    items: &[MatchItem],
) -> Result<Vec<PlannedChoice>, SpecRule> {
    for (index, item) in items.iter().enumerate() {
        if present(&item.text).is_none() && present(&item.media_url).is_none() {
            return Err(SpecRule::EmptyChoice { collection, index });
        }
    }

    let positions: Vec<Option<u32>> = items.iter().map(|i| i.position).collect();
    let resolved = resolve_positions(collection, &positions)?;

    Ok(items
        .iter()
        .zip(resolved)
        .map(|(item, position)| PlannedChoice {
            text: present(&item.text),
            media_url: present(&item.media_url),
            position,
            is_correct: None,
        })
        .collect())
}

/// Character offset of the single blank in `prompt`.
fn find_blank(prompt: &str) -> Result<u32, SpecRule> {
    let mut runs = 0;
    let mut first = None;
    let mut in_run = false;

    for (offset, ch) in prompt.chars().enumerate() {
        if ch == BLANK_MARKER {
            if !in_run {
                runs += 1;
                first.get_or_insert(offset);
            }
            in_run = true;
        } else {
            in_run = false;
        }
    }

    match (runs, first) {
        (1, Some(offset)) => u32::try_from(offset).map_err(|_| SpecRule::BlankCount(runs)),
        _ => Err(SpecRule::BlankCount(runs)),
    }
}

fn check_min(collection: ChoiceCollection, got: usize) -> Result<(), SpecRule> {
    if got < MIN_CHOICES {
        return Err(SpecRule::TooFewChoices {
            collection,
            min: MIN_CHOICES,
            got,
        });
    }
    Ok(())
}

fn check_single_correct(choices: &[AnswerChoice]) -> Result<(), SpecRule> {
    let correct = choices.iter().filter(|c| c.is_correct).count();
    if correct != 1 {
        return Err(SpecRule::CorrectCount(correct));
    }
    Ok(())
}

/// All omitted: list order. All given: must be a permutation of `1..=n`.
fn resolve_positions(
    collection: ChoiceCollection,
    positions: &[Option<u32>],
) -> Result<Vec<u16>, SpecRule> {
    let n = positions.len();
    if n > i16::MAX as usize {
        return Err(SpecRule::TooManyChoices {
            collection,
            max: i16::MAX as usize,
            got: n,
        });
    }

    let explicit = positions.iter().filter(|p| p.is_some()).count();
    if explicit == 0 {
        // n fits in i16 here
        return Ok((1..=n as u16).collect());
    }
    if explicit != n {
        return Err(SpecRule::MixedPositions { collection });
    }

    let invalid = SpecRule::InvalidPositions { collection, len: n };
    let mut seen = vec![false; n];
    let mut resolved = Vec::with_capacity(n);
    for p in positions.iter().flatten() {
        let slot = usize::try_from(*p)
            .ok()
            .and_then(|p| p.checked_sub(1))
            .and_then(|i| seen.get_mut(i))
            .ok_or_else(|| invalid.clone())?;
        if *slot {
            return Err(invalid);
        }
        *slot = true;
        resolved.push(*p as u16);
    }
    Ok(resolved)
}

/// `Some` only for strings with visible content.
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}
