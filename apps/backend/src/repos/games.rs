//! Game header repository functions for domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::games_sea as games_adapter;
use crate::domain::GameVariant;
use crate::entities::games;
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Game header as the domain sees it. Rounds live in [`super::rounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub lesson_id: i64,
    pub variant: GameVariant,
    pub total_rounds: u16,
    pub created_by: Option<i64>,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

/// Load a game or fail with `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let game = games_adapter::require_game(conn, game_id).await?;
    Game::try_from(game)
}

/// Games of a lesson ordered by id.
pub async fn find_all_by_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
) -> Result<Vec<Game>, DomainError> {
    games_adapter::find_all_by_lesson(conn, lesson_id)
        .await?
        .into_iter()
        .map(Game::try_from)
        .collect()
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
    created_by: Option<i64>,
    variant: GameVariant,
    total_rounds: u16,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameCreate::new(lesson_id, variant.into(), to_db_rounds(total_rounds)?)
        .by(created_by);
    let game = games_adapter::create_game(conn, dto).await?;
    Game::try_from(game)
}

/// Rewrite the header after a replace: new round count, fresh `updated_at`.
pub async fn update_header<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    total_rounds: u16,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameUpdateHeader {
        id: game_id,
        total_rounds: to_db_rounds(total_rounds)?,
    };
    let game = games_adapter::update_header(conn, dto).await?;
    Game::try_from(game)
}

/// Returns whether a game was removed.
pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<bool, DomainError> {
    let removed = games_adapter::delete_game(conn, game_id).await?;
    Ok(removed > 0)
}

fn to_db_rounds(total_rounds: u16) -> Result<i16, DomainError> {
    i16::try_from(total_rounds).map_err(|_| {
        DomainError::validation_other(format!("round count {total_rounds} does not fit storage"))
    })
}

// Conversions between DB models and domain models

impl TryFrom<games::Model> for Game {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        let total_rounds = u16::try_from(model.total_rounds).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!(
                    "game {} stores total_rounds {}",
                    model.id, model.total_rounds
                ),
            )
        })?;
        Ok(Self {
            id: model.id,
            lesson_id: model.lesson_id,
            variant: model.variant.into(),
            total_rounds,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<games::GameVariant> for GameVariant {
    fn from(v: games::GameVariant) -> Self {
        match v {
            games::GameVariant::FillBlank => GameVariant::FillBlank,
            games::GameVariant::Matching => GameVariant::Matching,
            games::GameVariant::MultipleChoice => GameVariant::MultipleChoice,
        }
    }
}

impl From<GameVariant> for games::GameVariant {
    fn from(v: GameVariant) -> Self {
        match v {
            GameVariant::FillBlank => games::GameVariant::FillBlank,
            GameVariant::Matching => games::GameVariant::Matching,
            GameVariant::MultipleChoice => games::GameVariant::MultipleChoice,
        }
    }
}
