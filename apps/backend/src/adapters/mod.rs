//! SeaORM adapters: plain queries over the entities, generic over
//! `ConnectionTrait` and returning `sea_orm::DbErr`.

pub mod choices_sea;
pub mod games_sea;
pub mod lessons_sea;
pub mod matches_sea;
pub mod rounds_sea;
pub mod users_sea;
