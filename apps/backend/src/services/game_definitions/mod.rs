//! Game definition service: validated, transactional writes of exercise
//! specifications and aggregated reads of stored games.
//!
//! Every write is `validating → writing → committed | rolled_back`, or
//! `validating → rejected` when the specification breaks a rule. Nothing
//! touches the store before validation passes.

mod aggregate;
pub mod id_map;
mod persistence;

use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

pub use id_map::{ChoiceIdMap, RoundIdMaps};

use crate::db::txn::{with_txn, SharedTxn};
use crate::domain::{
    validate, validate_for, GameSpec, GameVariant, GameView, SpecRule, SpecViolation,
    ValidatedGame,
};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::{games, lessons, users};

/// Create, replace, delete and read game definitions over one pool.
#[derive(Clone)]
pub struct GameService {
    db: DatabaseConnection,
    shared: Option<SharedTxn>,
}

impl GameService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, shared: None }
    }

    /// Run every operation inside `shared` instead of a transaction of
    /// its own. Reads go through it too.
    pub fn with_shared_txn(mut self, shared: SharedTxn) -> Self {
        self.shared = Some(shared);
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Validate `spec` as a `variant` game and store it under `lesson_id`.
    ///
    /// Fails with `NotFound(Lesson)` / `NotFound(User)` for unknown
    /// references and `Conflict(GameSlotTaken)` when the lesson already has a
    /// game of this variant.
    pub async fn create_game(
        &self,
        lesson_id: i64,
        author_id: Option<i64>,
        variant: GameVariant,
        spec: GameSpec,
    ) -> Result<GameView, DomainError> {
        let plan = check(None, Some(lesson_id), || validate_for(variant, &spec))?;
        let rounds = plan.rounds().len();
        debug!(stage = "writing", lesson_id, variant = %variant, rounds, "creating game");

        let result = with_txn::<_, DomainError, _>(self.shared.as_ref(), &self.db, move |txn| {
            Box::pin(async move {
                lessons::require_lesson(txn, lesson_id).await?;
                if let Some(user_id) = author_id {
                    users::require_user(txn, user_id).await?;
                }
                let taken = games::find_all_by_lesson(txn, lesson_id)
                    .await?
                    .iter()
                    .any(|g| g.variant == variant);
                if taken {
                    return Err(DomainError::conflict(
                        ConflictKind::GameSlotTaken,
                        format!("lesson {lesson_id} already has a {variant} game"),
                    ));
                }

                let game = persistence::insert_game(txn, lesson_id, author_id, &plan).await?;
                aggregate::load_game(txn, game.id).await
            })
        })
        .await;

        match &result {
            Ok(view) => info!(
                stage = "committed",
                game_id = view.id,
                lesson_id,
                variant = %variant,
                rounds,
                "game created"
            ),
            Err(e) => warn!(
                stage = "rolled_back",
                lesson_id,
                variant = %variant,
                error = %e,
                "game create failed"
            ),
        }
        result
    }

    /// Replace every round of an existing game. The variant cannot change;
    /// round, choice and match ids are regenerated.
    pub async fn replace_game(
        &self,
        game_id: i64,
        spec: GameSpec,
    ) -> Result<GameView, DomainError> {
        let plan = check(Some(game_id), None, || validate(&spec))?;
        let variant = plan.variant();
        let rounds = plan.rounds().len();
        debug!(stage = "writing", game_id, variant = %variant, rounds, "replacing game");

        let result = with_txn::<_, DomainError, _>(self.shared.as_ref(), &self.db, move |txn| {
            Box::pin(async move {
                let current = games::require_game(txn, game_id).await?;
                if current.variant != variant {
                    return Err(SpecViolation::game(SpecRule::VariantMismatch {
                        expected: current.variant,
                        actual: variant,
                    })
                    .into());
                }

                persistence::replace_rounds(txn, game_id, &plan).await?;
                aggregate::load_game(txn, game_id).await
            })
        })
        .await;

        match &result {
            Ok(view) => info!(
                stage = "committed",
                game_id,
                lesson_id = view.lesson_id,
                variant = %variant,
                rounds,
                "game replaced"
            ),
            Err(e) => warn!(
                stage = "rolled_back",
                game_id,
                variant = %variant,
                error = %e,
                "game replace failed"
            ),
        }
        result
    }

    /// Delete a game and everything under it.
    pub async fn delete_game(&self, game_id: i64) -> Result<(), DomainError> {
        let result = with_txn::<_, DomainError, _>(self.shared.as_ref(), &self.db, move |txn| {
            Box::pin(async move {
                if !games::delete_game(txn, game_id).await? {
                    return Err(DomainError::not_found(
                        NotFoundKind::Game,
                        format!("Game {game_id} not found"),
                    ));
                }
                Ok(())
            })
        })
        .await;

        match &result {
            Ok(()) => info!(stage = "committed", game_id, "game deleted"),
            Err(e) => warn!(stage = "rolled_back", game_id, error = %e, "game delete failed"),
        }
        result
    }

    pub async fn get_game(&self, game_id: i64) -> Result<GameView, DomainError> {
        match &self.shared {
            Some(shared) => aggregate::load_game(shared.transaction(), game_id).await,
            None => aggregate::load_game(&self.db, game_id).await,
        }
    }

    /// Games of a lesson ordered by id; `NotFound(Lesson)` for an unknown
    /// lesson, an empty list for a lesson without games.
    pub async fn list_games_for_lesson(&self, lesson_id: i64) -> Result<Vec<GameView>, DomainError> {
        match &self.shared {
            Some(shared) => {
                let txn = shared.transaction();
                lessons::require_lesson(txn, lesson_id).await?;
                aggregate::load_games_for_lesson(txn, lesson_id).await
            }
            None => {
                lessons::require_lesson(&self.db, lesson_id).await?;
                aggregate::load_games_for_lesson(&self.db, lesson_id).await
            }
        }
    }
}

/// Log the validation outcome and lift a violation into `DomainError`.
fn check(
    game_id: Option<i64>,
    lesson_id: Option<i64>,
    run: impl FnOnce() -> Result<ValidatedGame, SpecViolation>,
) -> Result<ValidatedGame, DomainError> {
    debug!(stage = "validating", game_id, lesson_id, "validating game spec");
    run().map_err(|violation| {
        warn!(
            stage = "rejected",
            game_id,
            lesson_id,
            round = violation.round,
            error = %violation,
            "game spec rejected"
        );
        violation.into()
    })
}
