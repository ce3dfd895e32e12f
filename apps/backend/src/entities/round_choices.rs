use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Which ordered collection of a round a choice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ChoiceCollection {
    /// Answer options of fill-blank and multiple-choice rounds
    #[sea_orm(string_value = "OPTIONS")]
    Options,
    #[sea_orm(string_value = "LEFT")]
    Left,
    #[sea_orm(string_value = "RIGHT")]
    Right,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round_choices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    pub collection: ChoiceCollection,
    #[sea_orm(column_type = "SmallInteger")]
    pub position: i16,
    #[sea_orm(column_type = "Text", nullable)]
    pub text: Option<String>,
    #[sea_orm(column_name = "media_url", column_type = "Text", nullable)]
    pub media_url: Option<String>,
    #[sea_orm(column_name = "is_correct")]
    pub is_correct: Option<bool>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::game_rounds::Entity",
        from = "Column::RoundId",
        to = "super::game_rounds::Column::Id",
        on_delete = "Cascade"
    )]
    Round,
}

impl Related<super::game_rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
