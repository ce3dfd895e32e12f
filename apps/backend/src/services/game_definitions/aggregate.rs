//! Read path: assemble stored rows into the nested [`GameView`].

use std::collections::{BTreeSet, HashMap};

use sea_orm::ConnectionTrait;

use crate::domain::{
    ChoiceCollection, ChoiceView, FillBlankRoundView, GameVariant, GameView, MatchView,
    MatchingRoundView, MultipleChoiceRoundView, RoundsView,
};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::games::{self, Game};
use crate::repos::rounds::{self, Choice, Match, Round};

/// Load one game with every round, choice and match.
pub async fn load_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<GameView, DomainError> {
    let game = games::require_game(conn, game_id).await?;
    let mut views = load_views(conn, vec![game]).await?;
    views.pop().ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::Other("empty aggregate".into()),
            format!("game {game_id} vanished during read"),
        )
    })
}

/// Games of a lesson ordered by id. The lesson is not checked here.
pub async fn load_games_for_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
) -> Result<Vec<GameView>, DomainError> {
    let headers = games::find_all_by_lesson(conn, lesson_id).await?;
    load_views(conn, headers).await
}

async fn load_views<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    headers: Vec<Game>,
) -> Result<Vec<GameView>, DomainError> {
    let game_ids: Vec<i64> = headers.iter().map(|g| g.id).collect();
    let round_rows = rounds::find_all_by_games(conn, &game_ids).await?;
    let round_ids: Vec<i64> = round_rows.iter().map(|r| r.id).collect();
    let choices = rounds::find_choices_by_rounds(conn, &round_ids).await?;
    let matches = rounds::find_matches_by_rounds(conn, &round_ids).await?;

    let mut rounds_by_game: HashMap<i64, Vec<Round>> = HashMap::new();
    for round in round_rows {
        rounds_by_game.entry(round.game_id).or_default().push(round);
    }
    let mut rows = RoundRows::default();
    for choice in choices {
        rows.choices.entry(choice.round_id).or_default().push(choice);
    }
    for pair in matches {
        rows.matches.entry(pair.round_id).or_default().push(pair);
    }

    headers
        .into_iter()
        .map(|game| {
            let game_rounds = rounds_by_game.remove(&game.id).unwrap_or_default();
            assemble(game, game_rounds, &rows)
        })
        .collect()
}

/// Choices and matches of the loaded rounds, keyed by round id.
#[derive(Debug, Default)]
pub(super) struct RoundRows {
    pub choices: HashMap<i64, Vec<Choice>>,
    pub matches: HashMap<i64, Vec<Match>>,
}

impl RoundRows {
    /// One collection of a round in display order.
    fn collection(&self, round_id: i64, collection: ChoiceCollection) -> Vec<ChoiceView> {
        let mut out: Vec<&Choice> = self
            .choices
            .get(&round_id)
            .map(|all| all.iter().filter(|c| c.collection == collection).collect())
            .unwrap_or_default();
        out.sort_by_key(|c| (c.position, c.id));
        out.into_iter().map(choice_view).collect()
    }

    fn stray_collections(&self, round_id: i64, allowed: &[ChoiceCollection]) -> bool {
        self.choices
            .get(&round_id)
            .is_some_and(|all| all.iter().any(|c| !allowed.contains(&c.collection)))
    }
}

/// Build one view from a header, its rounds (ordered by round_no) and
/// the rows of those rounds.
pub(super) fn assemble(
    game: Game,
    mut game_rounds: Vec<Round>,
    rows: &RoundRows,
) -> Result<GameView, DomainError> {
    game_rounds.sort_by_key(|r| r.round_no);

    let rounds = match game.variant {
        GameVariant::FillBlank => RoundsView::FillBlank(
            game_rounds
                .iter()
                .map(|r| fill_blank_round(game.id, r, rows))
                .collect::<Result<_, _>>()?,
        ),
        GameVariant::MultipleChoice => RoundsView::MultipleChoice(
            game_rounds
                .iter()
                .map(|r| multiple_choice_round(game.id, r, rows))
                .collect::<Result<_, _>>()?,
        ),
        GameVariant::Matching => RoundsView::Matching(
            game_rounds
                .iter()
                .map(|r| matching_round(game.id, r, rows))
                .collect::<Result<_, _>>()?,
        ),
    };

    Ok(GameView {
        id: game.id,
        lesson_id: game.lesson_id,
        total_rounds: u32::from(game.total_rounds),
        created_by: game.created_by,
        created_at: game.created_at,
        updated_at: game.updated_at,
        rounds,
    })
}

fn fill_blank_round(
    game_id: i64,
    round: &Round,
    rows: &RoundRows,
) -> Result<FillBlankRoundView, DomainError> {
    options_only(game_id, round, rows)?;
    let (Some(prompt), Some(blank_position)) = (round.prompt.clone(), round.blank_position) else {
        return Err(corrupt(
            game_id,
            round,
            "fill-blank round without prompt or blank offset",
        ));
    };
    Ok(FillBlankRoundView {
        id: round.id,
        round_no: u32::from(round.round_no),
        prompt,
        blank_position,
        choices: rows.collection(round.id, ChoiceCollection::Options),
    })
}

fn multiple_choice_round(
    game_id: i64,
    round: &Round,
    rows: &RoundRows,
) -> Result<MultipleChoiceRoundView, DomainError> {
    options_only(game_id, round, rows)?;
    let Some(question) = round.prompt.clone() else {
        return Err(corrupt(game_id, round, "multiple-choice round without question"));
    };
    Ok(MultipleChoiceRoundView {
        id: round.id,
        round_no: u32::from(round.round_no),
        question,
        choices: rows.collection(round.id, ChoiceCollection::Options),
    })
}

fn matching_round(
    game_id: i64,
    round: &Round,
    rows: &RoundRows,
) -> Result<MatchingRoundView, DomainError> {
    if rows.stray_collections(round.id, &[ChoiceCollection::Left, ChoiceCollection::Right]) {
        return Err(corrupt(game_id, round, "matching round holds OPTIONS choices"));
    }
    let left = rows.collection(round.id, ChoiceCollection::Left);
    let right = rows.collection(round.id, ChoiceCollection::Right);

    let mut matches = BTreeSet::new();
    for pair in rows.matches.get(&round.id).into_iter().flatten() {
        let on_left = left.iter().any(|c| c.id == pair.left_choice_id);
        let on_right = right.iter().any(|c| c.id == pair.right_choice_id);
        if !(on_left && on_right) {
            return Err(corrupt(
                game_id,
                round,
                "match references a choice outside its round sides",
            ));
        }
        matches.insert(MatchView {
            left_choice_id: pair.left_choice_id,
            right_choice_id: pair.right_choice_id,
        });
    }

    Ok(MatchingRoundView {
        id: round.id,
        round_no: u32::from(round.round_no),
        prompt: round.prompt.clone(),
        left,
        right,
        matches,
    })
}

fn options_only(game_id: i64, round: &Round, rows: &RoundRows) -> Result<(), DomainError> {
    if rows.stray_collections(round.id, &[ChoiceCollection::Options])
        || rows.matches.get(&round.id).is_some_and(|m| !m.is_empty())
    {
        return Err(corrupt(game_id, round, "option round holds matching rows"));
    }
    Ok(())
}

fn choice_view(c: &Choice) -> ChoiceView {
    ChoiceView {
        id: c.id,
        position: u32::from(c.position),
        text: c.text.clone(),
        media_url: c.media_url.clone(),
        is_correct: c.is_correct,
    }
}

fn corrupt(game_id: i64, round: &Round, what: &str) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("game {game_id} round {}: {what}", round.round_no),
    )
}
