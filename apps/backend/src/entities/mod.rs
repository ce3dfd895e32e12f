pub mod game_rounds;
pub mod games;
pub mod lessons;
pub mod round_choices;
pub mod round_matches;
pub mod users;

pub use game_rounds::Entity as GameRounds;
pub use game_rounds::Model as GameRound;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use lessons::Entity as Lessons;
pub use lessons::Model as Lesson;
pub use round_choices::Entity as RoundChoices;
pub use round_choices::Model as RoundChoice;
pub use round_matches::Entity as RoundMatches;
pub use round_matches::Model as RoundMatch;
pub use users::Entity as Users;
pub use users::Model as User;
