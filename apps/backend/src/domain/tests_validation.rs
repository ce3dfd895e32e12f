use crate::domain::spec::{
    AnswerChoice, ChoiceCollection, FillBlankRound, GameSpec, MatchItem, MatchPair,
    MatchingRound, MultipleChoiceRound, RoundsSpec,
};
use crate::domain::validation::{validate, validate_for, PlannedContent, SpecRule, SpecViolation};
use crate::domain::{GameVariant, MatchingError};

fn cat_round() -> FillBlankRound {
    FillBlankRound {
        prompt: "The cat _ on the mat".into(),
        choices: vec![
            AnswerChoice::text("sat").correct(),
            AnswerChoice::text("flew"),
            AnswerChoice::text("sang"),
        ],
    }
}

fn colour_question() -> MultipleChoiceRound {
    MultipleChoiceRound {
        question: "Which is a colour?".into(),
        choices: vec![
            AnswerChoice::text("Blue").correct(),
            AnswerChoice::text("Chair"),
        ],
    }
}

fn animals() -> MatchingRound {
    MatchingRound {
        prompt: None,
        left: vec![MatchItem::text("dog"), MatchItem::text("cat"), MatchItem::text("cow")],
        right: vec![MatchItem::text("perro"), MatchItem::text("gato"), MatchItem::text("vaca")],
        matches: vec![MatchPair::new(0, 0), MatchPair::new(1, 1), MatchPair::new(2, 2)],
    }
}

fn fill_blank(rounds: Vec<FillBlankRound>) -> GameSpec {
    GameSpec::FillBlank(RoundsSpec::new(rounds))
}

fn round_rule(spec: &GameSpec) -> (Option<usize>, SpecRule) {
    let SpecViolation { round, rule } = validate(spec).unwrap_err();
    (round, rule)
}

#[test]
fn two_round_fill_blank_is_planned() {
    let mut second = cat_round();
    second.prompt = "Dogs ___ loudly".into();
    let game = validate(&fill_blank(vec![cat_round(), second])).unwrap();

    assert_eq!(game.variant(), GameVariant::FillBlank);
    assert_eq!(game.total_rounds(), 2);
    let rounds = game.rounds();
    assert_eq!(rounds[0].round_no, 1);
    assert_eq!(rounds[0].blank_position, Some(8));
    assert_eq!(rounds[1].round_no, 2);
    assert_eq!(rounds[1].blank_position, Some(5));

    let PlannedContent::Options(choices) = &rounds[0].content else {
        panic!("fill-blank rounds plan options");
    };
    let positions: Vec<u16> = choices.iter().map(|c| c.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert_eq!(
        choices.iter().filter(|c| c.is_correct == Some(true)).count(),
        1
    );
}

#[test]
fn declared_round_count_must_match() {
    let spec = GameSpec::FillBlank(RoundsSpec {
        total_rounds: 3,
        rounds: vec![cat_round()],
    });
    assert_eq!(
        round_rule(&spec),
        (
            None,
            SpecRule::RoundCountMismatch {
                declared: 3,
                supplied: 1
            }
        )
    );
}

#[test]
fn round_count_is_bounded() {
    assert_eq!(
        round_rule(&fill_blank(vec![])),
        (None, SpecRule::RoundCountOutOfRange(0))
    );
    assert_eq!(
        round_rule(&fill_blank(vec![cat_round(); 11])),
        (None, SpecRule::RoundCountOutOfRange(11))
    );
    assert!(validate(&fill_blank(vec![cat_round(); 10])).is_ok());
}

#[test]
fn fill_blank_rules_name_the_round() {
    let mut no_blank = cat_round();
    no_blank.prompt = "The cat sat on the mat".into();
    assert_eq!(
        round_rule(&fill_blank(vec![cat_round(), no_blank])),
        (Some(1), SpecRule::BlankCount(0))
    );

    let mut two_correct = cat_round();
    two_correct.choices[1].is_correct = true;
    assert_eq!(
        round_rule(&fill_blank(vec![two_correct])),
        (Some(0), SpecRule::CorrectCount(2))
    );

    let mut none_correct = cat_round();
    none_correct.choices[0].is_correct = false;
    assert_eq!(
        round_rule(&fill_blank(vec![none_correct])),
        (Some(0), SpecRule::CorrectCount(0))
    );

    let mut lonely = cat_round();
    lonely.choices.truncate(1);
    assert_eq!(
        round_rule(&fill_blank(vec![lonely])),
        (
            Some(0),
            SpecRule::TooFewChoices {
                collection: ChoiceCollection::Options,
                min: 2,
                got: 1
            }
        )
    );
}

#[test]
fn fill_blank_choice_may_be_media_only() {
    let mut round = cat_round();
    round.choices[2] = AnswerChoice::media("https://cdn.test/sing.png");
    assert!(validate(&fill_blank(vec![round.clone()])).is_ok());

    round.choices[2] = AnswerChoice {
        text: Some("   ".into()),
        ..AnswerChoice::default()
    };
    assert_eq!(
        round_rule(&fill_blank(vec![round])),
        (
            Some(0),
            SpecRule::EmptyChoice {
                collection: ChoiceCollection::Options,
                index: 2
            }
        )
    );
}

#[test]
fn multiple_choice_rules() {
    let mc = |round: MultipleChoiceRound| GameSpec::MultipleChoice(RoundsSpec::new(vec![round]));

    assert!(validate(&mc(colour_question())).is_ok());

    let mut blank_question = colour_question();
    blank_question.question = "  ".into();
    assert_eq!(
        round_rule(&mc(blank_question)),
        (Some(0), SpecRule::EmptyQuestion)
    );

    let mut too_many = colour_question();
    too_many
        .choices
        .extend((0..5).map(|i| AnswerChoice::text(format!("extra {i}"))));
    assert_eq!(
        round_rule(&mc(too_many)),
        (
            Some(0),
            SpecRule::TooManyChoices {
                collection: ChoiceCollection::Options,
                max: 6,
                got: 7
            }
        )
    );

    let mut media_only = colour_question();
    media_only.choices[1] = AnswerChoice::media("https://cdn.test/chair.png");
    assert_eq!(
        round_rule(&mc(media_only)),
        (Some(0), SpecRule::ChoiceTextRequired { index: 1 })
    );
}

#[test]
fn matching_rules() {
    let m = |round: MatchingRound| GameSpec::Matching(RoundsSpec::new(vec![round]));

    let game = validate(&m(animals())).unwrap();
    let PlannedContent::Pairs { left, right, matches } = &game.rounds()[0].content else {
        panic!("matching rounds plan pairs");
    };
    assert_eq!((left.len(), right.len(), matches.len()), (3, 3, 3));
    assert!(left.iter().all(|c| c.is_correct.is_none()));

    let mut missing = animals();
    missing.matches.pop();
    assert_eq!(
        round_rule(&m(missing)),
        (Some(0), SpecRule::Matching(MatchingError::LeftUnmatched(2)))
    );

    let mut unequal = animals();
    unequal.right.pop();
    assert_eq!(
        round_rule(&m(unequal)),
        (
            Some(0),
            SpecRule::Matching(MatchingError::UnequalSides { left: 3, right: 2 })
        )
    );

    let mut short = animals();
    short.left.truncate(1);
    assert_eq!(
        round_rule(&m(short)),
        (
            Some(0),
            SpecRule::TooFewChoices {
                collection: ChoiceCollection::Left,
                min: 2,
                got: 1
            }
        )
    );

    let mut empty_item = animals();
    empty_item.right[1] = MatchItem::default();
    assert_eq!(
        round_rule(&m(empty_item)),
        (
            Some(0),
            SpecRule::EmptyChoice {
                collection: ChoiceCollection::Right,
                index: 1
            }
        )
    );
}

#[test]
fn whitespace_matching_prompt_is_dropped() {
    let mut round = animals();
    round.prompt = Some("   ".into());
    let game = validate(&GameSpec::Matching(RoundsSpec::new(vec![round]))).unwrap();
    assert_eq!(game.rounds()[0].prompt, None);
}

#[test]
fn variant_must_match_the_requested_one() {
    let err = validate_for(GameVariant::Matching, &fill_blank(vec![cat_round()])).unwrap_err();
    assert_eq!(
        err,
        SpecViolation::game(SpecRule::VariantMismatch {
            expected: GameVariant::Matching,
            actual: GameVariant::FillBlank
        })
    );
}

#[test]
fn as_spec_orders_choices_by_position() {
    let round = FillBlankRound {
        prompt: "The cat _ on the mat".into(),
        choices: vec![
            AnswerChoice::text("c").at(3),
            AnswerChoice::text("a").at(1).correct(),
            AnswerChoice::text("b").at(2),
        ],
    };
    let GameSpec::FillBlank(spec) = validate(&fill_blank(vec![round])).unwrap().as_spec() else {
        panic!("expected fill-blank spec");
    };
    let texts: Vec<_> = spec.rounds[0]
        .choices
        .iter()
        .map(|c| (c.text.as_deref(), c.position, c.is_correct))
        .collect();
    assert_eq!(
        texts,
        vec![
            (Some("a"), Some(1), true),
            (Some("b"), Some(2), false),
            (Some("c"), Some(3), false)
        ]
    );
}

#[test]
fn as_spec_remaps_match_indices_to_display_order() {
    let round = MatchingRound {
        prompt: Some("Translate".into()),
        left: vec![MatchItem::text("dog").at(2), MatchItem::text("cat").at(1)],
        right: vec![MatchItem::text("gato").at(1), MatchItem::text("perro").at(2)],
        // dog-perro, cat-gato
        matches: vec![MatchPair::new(0, 1), MatchPair::new(1, 0)],
    };
    let GameSpec::Matching(spec) = validate(&GameSpec::Matching(RoundsSpec::new(vec![round])))
        .unwrap()
        .as_spec()
    else {
        panic!("expected matching spec");
    };
    let round = &spec.rounds[0];
    assert_eq!(round.left[0].text.as_deref(), Some("cat"));
    assert_eq!(round.left[1].text.as_deref(), Some("dog"));
    // cat(0)-gato(0), dog(1)-perro(1)
    assert_eq!(round.matches, vec![MatchPair::new(0, 0), MatchPair::new(1, 1)]);
}
