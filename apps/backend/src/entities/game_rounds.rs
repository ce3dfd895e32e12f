use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    #[sea_orm(column_name = "round_no", column_type = "SmallInteger")]
    pub round_no: i16,
    /// Fill-blank prompt, multiple-choice question or matching instructions
    #[sea_orm(column_type = "Text", nullable)]
    pub prompt: Option<String>,
    /// Character offset of the blank; fill-blank rounds only
    #[sea_orm(column_name = "blank_position")]
    pub blank_position: Option<i32>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id",
        on_delete = "Cascade"
    )]
    Game,
    #[sea_orm(has_many = "super::round_choices::Entity")]
    RoundChoices,
    #[sea_orm(has_many = "super::round_matches::Entity")]
    RoundMatches,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::round_choices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundChoices.def()
    }
}

impl Related<super::round_matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundMatches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
