//! Domain layer: exercise specifications, validation and read models.
//! Pure types and functions; nothing here touches storage.

pub mod matching;
pub mod spec;
pub mod validation;
pub mod variant;
pub mod view;

pub use matching::{validate_matching, MatchingError, Side};
pub use spec::{
    AnswerChoice, ChoiceCollection, FillBlankRound, GameSpec, MatchItem, MatchPair,
    MatchingRound, MultipleChoiceRound, RoundsSpec,
};
pub use validation::{validate, validate_for, SpecRule, SpecViolation, ValidatedGame};
pub use variant::GameVariant;
pub use view::{
    ChoiceView, FillBlankRoundView, GameView, MatchView, MatchingRoundView,
    MultipleChoiceRoundView, RoundsView,
};

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_props_matching;
#[cfg(test)]
mod tests_props_validation;
#[cfg(test)]
mod tests_validation;
