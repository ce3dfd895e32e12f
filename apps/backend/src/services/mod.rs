//! Service layer: orchestration over repos inside transactions.

pub mod game_definitions;

pub use game_definitions::GameService;
