//! Infrastructure layer - database bootstrap, state building and DbErr mapping.

pub mod db;
pub mod db_errors;
pub mod state;
