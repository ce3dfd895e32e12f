//! Repository functions for the domain layer.

pub mod games;
pub mod lessons;
pub mod rounds;
pub mod users;
