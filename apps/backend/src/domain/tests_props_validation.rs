//! Property tests for specification validation (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::spec::{AnswerChoice, FillBlankRound, GameSpec, RoundsSpec, MAX_ROUNDS};
use crate::domain::test_prelude;
use crate::domain::validation::{validate, SpecRule};

/// A valid fill-blank round and its expected blank offset.
fn fill_blank_round() -> impl Strategy<Value = (FillBlankRound, u32)> {
    ("[a-z ]{0,12}", "[a-z ]{0,12}", 2usize..=6, any::<prop::sample::Index>(), any::<bool>())
        .prop_flat_map(|(before, after, n, correct, explicit)| {
            let order = Just((1..=n as u32).collect::<Vec<_>>()).prop_shuffle();
            (Just(before), Just(after), Just(n), Just(correct.index(n)), Just(explicit), order)
        })
        .prop_map(|(before, after, n, correct, explicit, order)| {
            let choices = (0..n)
                .map(|i| {
                    let mut c = AnswerChoice::text(format!("choice {i}"));
                    c.is_correct = i == correct;
                    if explicit {
                        c.position = Some(order[i]);
                    }
                    c
                })
                .collect();
            let offset = before.chars().count() as u32;
            (
                FillBlankRound {
                    prompt: format!("{before}_{after}"),
                    choices,
                },
                offset,
            )
        })
}

fn fill_blank_game() -> impl Strategy<Value = (GameSpec, Vec<u32>)> {
    prop::collection::vec(fill_blank_round(), 1..=MAX_ROUNDS as usize).prop_map(|rounds| {
        let offsets = rounds.iter().map(|(_, o)| *o).collect();
        let rounds = rounds.into_iter().map(|(r, _)| r).collect();
        (GameSpec::FillBlank(RoundsSpec::new(rounds)), offsets)
    })
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Well-formed fill-blank games validate, with rounds numbered 1..=N and
    /// the blank offset derived from the prompt.
    #[test]
    fn prop_valid_fill_blank_accepted((spec, offsets) in fill_blank_game()) {
        let game = validate(&spec).expect("generated spec is valid");
        prop_assert_eq!(usize::from(game.total_rounds()), offsets.len());
        for (i, round) in game.rounds().iter().enumerate() {
            prop_assert_eq!(usize::from(round.round_no), i + 1);
            prop_assert_eq!(round.blank_position, Some(offsets[i]));
        }
    }

    /// The canonical form is a fixed point of validation.
    #[test]
    fn prop_canonical_spec_is_stable((spec, _) in fill_blank_game()) {
        let canonical = validate(&spec).expect("valid").as_spec();
        let again = validate(&canonical).expect("canonical spec is valid").as_spec();
        prop_assert_eq!(again, canonical);
    }

    /// Any disagreement between declared and supplied rounds is rejected at
    /// game level.
    #[test]
    fn prop_declared_count_mismatch_rejected(
        (spec, _) in fill_blank_game(),
        delta in 1u32..5,
    ) {
        let GameSpec::FillBlank(mut rounds) = spec else { unreachable!() };
        rounds.total_rounds += delta;
        let supplied = rounds.rounds.len();
        let declared = rounds.total_rounds;
        let err = validate(&GameSpec::FillBlank(rounds)).unwrap_err();
        prop_assert_eq!(err.round, None);
        prop_assert_eq!(err.rule, SpecRule::RoundCountMismatch { declared, supplied });
    }
}
