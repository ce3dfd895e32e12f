//! Stored games read back as the canonical form of what was submitted.

mod common;
mod support;

use lesson_games::domain::{validate, GameSpec, RoundsView};
use lesson_games::GameService;
use support::factory::seed_lesson;
use support::specs::{capitals_matching, cat_fill_blank, shuffled_multiple_choice};
use support::test_state::{parts, test_state};

async fn create_and_read(
    games: &GameService,
    lesson_id: i64,
    spec: GameSpec,
) -> Result<(), Box<dyn std::error::Error>> {
    let expected = validate(&spec)?.as_spec();
    let created = games
        .create_game(lesson_id, None, spec.variant(), spec)
        .await?;
    let read = games.get_game(created.id).await?;

    assert_eq!(read, created);
    assert_eq!(read.to_spec(), expected);
    Ok(())
}

#[tokio::test]
async fn every_variant_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (games, db) = parts(&state);
    let lesson = seed_lesson(&db).await?;

    create_and_read(&games, lesson.id, cat_fill_blank()).await?;
    create_and_read(&games, lesson.id, capitals_matching()).await?;
    create_and_read(&games, lesson.id, shuffled_multiple_choice()).await?;
    Ok(())
}

#[tokio::test]
async fn choices_come_back_in_display_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (games, db) = parts(&state);
    let lesson = seed_lesson(&db).await?;
    let spec = shuffled_multiple_choice();

    let view = games
        .create_game(lesson.id, None, spec.variant(), spec)
        .await?;

    let RoundsView::MultipleChoice(rounds) = &view.rounds else {
        panic!("expected multiple-choice rounds");
    };
    let positions: Vec<u32> = rounds[0].choices.iter().map(|c| c.position).collect();
    let texts: Vec<&str> = rounds[0]
        .choices
        .iter()
        .filter_map(|c| c.text.as_deref())
        .collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert_eq!(texts, vec!["Jupiter", "Venus", "Mars"]);
    assert_eq!(rounds[0].choices[0].is_correct, Some(true));
    Ok(())
}

#[tokio::test]
async fn matching_pairs_reference_stored_choices() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (games, db) = parts(&state);
    let lesson = seed_lesson(&db).await?;
    let spec = capitals_matching();

    let view = games
        .create_game(lesson.id, None, spec.variant(), spec)
        .await?;

    let RoundsView::Matching(rounds) = &view.rounds else {
        panic!("expected matching rounds");
    };
    let round = &rounds[0];
    assert_eq!(round.left.len(), 3);
    assert_eq!(round.right.len(), 3);
    assert_eq!(round.matches.len(), 3);

    let text_of = |side: &[lesson_games::domain::ChoiceView], id: i64| {
        side.iter()
            .find(|c| c.id == id)
            .and_then(|c| c.text.clone().or(c.media_url.clone()))
    };
    let pairs: Vec<(Option<String>, Option<String>)> = round
        .matches
        .iter()
        .map(|m| {
            (
                text_of(&round.left, m.left_choice_id),
                text_of(&round.right, m.right_choice_id),
            )
        })
        .collect();
    assert!(pairs.contains(&(Some("France".into()), Some("Paris".into()))));
    assert!(pairs.contains(&(
        Some("Japan".into()),
        Some("https://cdn.example.test/tokyo.png".into())
    )));
    assert!(pairs.contains(&(Some("Peru".into()), Some("Lima".into()))));
    Ok(())
}

#[tokio::test]
async fn replacing_with_own_spec_keeps_shape() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let (games, db) = parts(&state);
    let lesson = seed_lesson(&db).await?;
    let spec = capitals_matching();

    let first = games
        .create_game(lesson.id, None, spec.variant(), spec)
        .await?;
    let second = games.replace_game(first.id, first.to_spec()).await?;
    let third = games.replace_game(first.id, second.to_spec()).await?;

    assert_eq!(first.to_spec(), second.to_spec());
    assert_eq!(second.to_spec(), third.to_spec());
    assert_eq!(third.rounds.len(), 1);
    Ok(())
}
