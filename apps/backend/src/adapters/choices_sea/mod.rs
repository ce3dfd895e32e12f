//! SeaORM adapter for round choices - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::round_choices;

pub mod dto;

pub use dto::ChoiceCreate;

pub async fn create_choice<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ChoiceCreate,
) -> Result<round_choices::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let choice = round_choices::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        collection: Set(dto.collection),
        position: Set(dto.position),
        text: Set(dto.text),
        media_url: Set(dto.media_url),
        is_correct: Set(dto.is_correct),
        created_at: Set(now),
    };

    choice.insert(conn).await
}

/// Choices of the given rounds ordered by (round_id, collection, position).
pub async fn find_all_by_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<Vec<round_choices::Model>, sea_orm::DbErr> {
    if round_ids.is_empty() {
        return Ok(Vec::new());
    }
    round_choices::Entity::find()
        .filter(round_choices::Column::RoundId.is_in(round_ids.iter().copied()))
        .order_by_asc(round_choices::Column::RoundId)
        .order_by_asc(round_choices::Column::Collection)
        .order_by_asc(round_choices::Column::Position)
        .all(conn)
        .await
}
