//! Round, choice and match repository functions for domain layer
//! (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::{
    choices_sea as choices_adapter, matches_sea as matches_adapter, rounds_sea as rounds_adapter,
};
use crate::domain::ChoiceCollection;
use crate::entities::{game_rounds, round_choices, round_matches};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Round domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: i64,
    pub game_id: i64,
    pub round_no: u16,
    pub prompt: Option<String>,
    pub blank_position: Option<u32>,
}

/// Choice domain model; one entry of an OPTIONS, LEFT or RIGHT collection
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub id: i64,
    pub round_id: i64,
    pub collection: ChoiceCollection,
    pub position: u16,
    pub text: Option<String>,
    pub media_url: Option<String>,
    pub is_correct: Option<bool>,
}

/// Stored pair of a matching round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub id: i64,
    pub round_id: i64,
    pub left_choice_id: i64,
    pub right_choice_id: i64,
}

/// Values of a choice row to insert.
#[derive(Debug, Clone)]
pub struct NewChoice {
    pub collection: ChoiceCollection,
    pub position: u16,
    pub text: Option<String>,
    pub media_url: Option<String>,
    pub is_correct: Option<bool>,
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    round_no: u16,
    prompt: Option<String>,
    blank_position: Option<u32>,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        game_id,
        round_no: small(round_no, "round_no")?,
        prompt,
        blank_position: blank_position
            .map(|b| {
                i32::try_from(b).map_err(|_| {
                    DomainError::validation_other(format!("blank offset {b} does not fit storage"))
                })
            })
            .transpose()?,
    };
    let round = rounds_adapter::create_round(conn, dto).await?;
    Round::try_from(round)
}

pub async fn create_choice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    choice: NewChoice,
) -> Result<Choice, DomainError> {
    let dto = choices_adapter::ChoiceCreate {
        round_id,
        collection: choice.collection.into(),
        position: small(choice.position, "position")?,
        text: choice.text,
        media_url: choice.media_url,
        is_correct: choice.is_correct,
    };
    let row = choices_adapter::create_choice(conn, dto).await?;
    Choice::try_from(row)
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    left_choice_id: i64,
    right_choice_id: i64,
) -> Result<Match, DomainError> {
    let dto = matches_adapter::MatchCreate {
        round_id,
        left_choice_id,
        right_choice_id,
    };
    let row = matches_adapter::create_match(conn, dto).await?;
    Ok(Match::from(row))
}

/// Rounds of the given games ordered by (game_id, round_no).
pub async fn find_all_by_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<Vec<Round>, DomainError> {
    rounds_adapter::find_all_by_games(conn, game_ids)
        .await?
        .into_iter()
        .map(Round::try_from)
        .collect()
}

/// Choices of the given rounds ordered by (round_id, collection, position).
pub async fn find_choices_by_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<Vec<Choice>, DomainError> {
    choices_adapter::find_all_by_rounds(conn, round_ids)
        .await?
        .into_iter()
        .map(Choice::try_from)
        .collect()
}

pub async fn find_matches_by_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::find_all_by_rounds(conn, round_ids).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

/// Remove every round of a game together with its choices and matches.
pub async fn delete_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    Ok(rounds_adapter::delete_all_by_game(conn, game_id).await?)
}

fn small(value: u16, column: &str) -> Result<i16, DomainError> {
    i16::try_from(value)
        .map_err(|_| DomainError::validation_other(format!("{column} {value} does not fit storage")))
}

fn corrupt(what: &str, id: i64, value: impl std::fmt::Display) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("{what} {id} stores {value}"),
    )
}

// Conversions between DB models and domain models

impl TryFrom<game_rounds::Model> for Round {
    type Error = DomainError;

    fn try_from(model: game_rounds::Model) -> Result<Self, Self::Error> {
        let round_no = u16::try_from(model.round_no)
            .map_err(|_| corrupt("round", model.id, format_args!("round_no {}", model.round_no)))?;
        let blank_position = model
            .blank_position
            .map(|b| {
                u32::try_from(b)
                    .map_err(|_| corrupt("round", model.id, format_args!("blank_position {b}")))
            })
            .transpose()?;
        Ok(Self {
            id: model.id,
            game_id: model.game_id,
            round_no,
            prompt: model.prompt,
            blank_position,
        })
    }
}

impl TryFrom<round_choices::Model> for Choice {
    type Error = DomainError;

    fn try_from(model: round_choices::Model) -> Result<Self, Self::Error> {
        let position = u16::try_from(model.position)
            .map_err(|_| corrupt("choice", model.id, format_args!("position {}", model.position)))?;
        Ok(Self {
            id: model.id,
            round_id: model.round_id,
            collection: model.collection.into(),
            position,
            text: model.text,
            media_url: model.media_url,
            is_correct: model.is_correct,
        })
    }
}

impl From<round_matches::Model> for Match {
    fn from(model: round_matches::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            left_choice_id: model.left_choice_id,
            right_choice_id: model.right_choice_id,
        }
    }
}

impl From<round_choices::ChoiceCollection> for ChoiceCollection {
    fn from(c: round_choices::ChoiceCollection) -> Self {
        match c {
            round_choices::ChoiceCollection::Options => ChoiceCollection::Options,
            round_choices::ChoiceCollection::Left => ChoiceCollection::Left,
            round_choices::ChoiceCollection::Right => ChoiceCollection::Right,
        }
    }
}

impl From<ChoiceCollection> for round_choices::ChoiceCollection {
    fn from(c: ChoiceCollection) -> Self {
        match c {
            ChoiceCollection::Options => round_choices::ChoiceCollection::Options,
            ChoiceCollection::Left => round_choices::ChoiceCollection::Left,
            ChoiceCollection::Right => round_choices::ChoiceCollection::Right,
        }
    }
}
