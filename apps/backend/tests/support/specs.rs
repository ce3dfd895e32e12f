//! Ready-made exercise specifications.

use lesson_games::domain::{
    AnswerChoice, FillBlankRound, GameSpec, MatchItem, MatchPair, MatchingRound,
    MultipleChoiceRound, RoundsSpec,
};

pub const CAT_PROMPT: &str = "The cat _ on the mat";

fn cat_round() -> FillBlankRound {
    FillBlankRound {
        prompt: CAT_PROMPT.into(),
        choices: vec![
            AnswerChoice::text("sat").correct(),
            AnswerChoice::text("ran"),
            AnswerChoice::text("flew"),
        ],
    }
}

/// Two rounds; the first is the cat sentence with its blank at offset 8.
pub fn cat_fill_blank() -> GameSpec {
    GameSpec::FillBlank(RoundsSpec::new(vec![
        cat_round(),
        FillBlankRound {
            prompt: "A _ day at the beach".into(),
            choices: vec![
                AnswerChoice::text("rainy"),
                AnswerChoice::text("sunny").correct(),
            ],
        },
    ]))
}

/// The cat sentence alone.
pub fn cat_fill_blank_single() -> GameSpec {
    GameSpec::FillBlank(RoundsSpec::new(vec![cat_round()]))
}

/// Three-by-three matching round with a perfect pairing.
pub fn capitals_matching() -> GameSpec {
    GameSpec::Matching(RoundsSpec::new(vec![MatchingRound {
        prompt: Some("Match each country to its capital".into()),
        left: vec![
            MatchItem::text("France"),
            MatchItem::text("Japan"),
            MatchItem::text("Peru"),
        ],
        right: vec![
            MatchItem::text("Lima"),
            MatchItem::text("Paris"),
            MatchItem::media("https://cdn.example.test/tokyo.png"),
        ],
        matches: vec![
            MatchPair::new(0, 1),
            MatchPair::new(1, 2),
            MatchPair::new(2, 0),
        ],
    }]))
}

/// Same variant as [`capitals_matching`], different content.
pub fn animals_matching() -> GameSpec {
    GameSpec::Matching(RoundsSpec::new(vec![MatchingRound {
        prompt: None,
        left: vec![MatchItem::text("cow"), MatchItem::text("dog")],
        right: vec![MatchItem::text("bark"), MatchItem::text("moo")],
        matches: vec![MatchPair::new(0, 1), MatchPair::new(1, 0)],
    }]))
}

/// One question whose choices were submitted with positions 3, 1, 2.
pub fn shuffled_multiple_choice() -> GameSpec {
    GameSpec::MultipleChoice(RoundsSpec::new(vec![MultipleChoiceRound {
        question: "Which planet is largest?".into(),
        choices: vec![
            AnswerChoice::text("Mars").at(3),
            AnswerChoice::text("Jupiter").correct().at(1),
            AnswerChoice::text("Venus").at(2),
        ],
    }]))
}
