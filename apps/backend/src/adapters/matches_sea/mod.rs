//! SeaORM adapter for matching pairs - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::round_matches;

pub mod dto;

pub use dto::MatchCreate;

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<round_matches::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let pair = round_matches::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        left_choice_id: Set(dto.left_choice_id),
        right_choice_id: Set(dto.right_choice_id),
        created_at: Set(now),
    };

    pair.insert(conn).await
}

pub async fn find_all_by_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<Vec<round_matches::Model>, sea_orm::DbErr> {
    if round_ids.is_empty() {
        return Ok(Vec::new());
    }
    round_matches::Entity::find()
        .filter(round_matches::Column::RoundId.is_in(round_ids.iter().copied()))
        .order_by_asc(round_matches::Column::RoundId)
        .order_by_asc(round_matches::Column::Id)
        .all(conn)
        .await
}
