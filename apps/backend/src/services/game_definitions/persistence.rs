//! Write path: header, then rounds in order, then each round's choices and
//! matches. Callers run these inside one transaction.

use sea_orm::ConnectionTrait;
use tracing::debug;

use super::id_map::RoundIdMaps;
use crate::domain::validation::{PlannedChoice, PlannedContent, PlannedRound};
use crate::domain::{ChoiceCollection, Side, ValidatedGame};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::games::{self, Game};
use crate::repos::rounds::{self, NewChoice};

/// Insert a new game header and all of its rounds.
pub async fn insert_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
    author_id: Option<i64>,
    plan: &ValidatedGame,
) -> Result<Game, DomainError> {
    let game = games::create_game(
        conn,
        lesson_id,
        author_id,
        plan.variant(),
        plan.total_rounds(),
    )
    .await?;
    insert_rounds(conn, game.id, plan).await?;
    Ok(game)
}

/// Swap every round of `game_id` for the rounds of `plan`.
/// Round, choice and match ids are regenerated.
pub async fn replace_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    plan: &ValidatedGame,
) -> Result<Game, DomainError> {
    let game = games::update_header(conn, game_id, plan.total_rounds()).await?;
    let removed = rounds::delete_all_by_game(conn, game_id).await?;
    debug!(game_id, removed, "previous rounds deleted");
    insert_rounds(conn, game_id, plan).await?;
    Ok(game)
}

async fn insert_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    plan: &ValidatedGame,
) -> Result<(), DomainError> {
    for round in plan.rounds() {
        insert_round(conn, game_id, round).await?;
    }
    Ok(())
}

async fn insert_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    round: &PlannedRound,
) -> Result<(), DomainError> {
    let row = rounds::create_round(
        conn,
        game_id,
        round.round_no,
        round.prompt.clone(),
        round.blank_position,
    )
    .await?;

    match &round.content {
        PlannedContent::Options(choices) => {
            for choice in choices {
                rounds::create_choice(conn, row.id, new_choice(ChoiceCollection::Options, choice))
                    .await?;
            }
        }
        PlannedContent::Pairs {
            left,
            right,
            matches,
        } => {
            // Phase one: both sides, recording index -> id
            let mut ids = RoundIdMaps::default();
            for (side, collection, items) in [
                (Side::Left, ChoiceCollection::Left, left),
                (Side::Right, ChoiceCollection::Right, right),
            ] {
                for (index, item) in items.iter().enumerate() {
                    let stored =
                        rounds::create_choice(conn, row.id, new_choice(collection, item)).await?;
                    let previous = ids.side_mut(side).record(index, stored.id);
                    debug_assert!(previous.is_none(), "{side} index {index} recorded twice");
                }
            }

            // Phase two: pairs through the maps
            for pair in matches {
                let (left_id, right_id) = ids.resolve_pair(pair).map_err(|(side, index)| {
                    DomainError::infra(
                        InfraErrorKind::Other("unresolved match index".into()),
                        format!("round {}: no stored {side} choice for index {index}", round.round_no),
                    )
                })?;
                rounds::create_match(conn, row.id, left_id, right_id).await?;
            }
        }
    }

    debug!(
        game_id,
        round_id = row.id,
        round_no = round.round_no,
        "round written"
    );
    Ok(())
}

fn new_choice(collection: ChoiceCollection, choice: &PlannedChoice) -> NewChoice {
    NewChoice {
        collection,
        position: choice.position,
        text: choice.text.clone(),
        media_url: choice.media_url.clone(),
        is_correct: choice.is_correct,
    }
}
