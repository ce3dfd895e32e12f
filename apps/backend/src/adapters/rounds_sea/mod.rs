//! SeaORM adapter for game rounds - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::game_rounds;

pub mod dto;

pub use dto::RoundCreate;

/// Rounds of several games ordered by (game_id, round_no).
pub async fn find_all_by_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_ids: &[i64],
) -> Result<Vec<game_rounds::Model>, sea_orm::DbErr> {
    if game_ids.is_empty() {
        return Ok(Vec::new());
    }
    game_rounds::Entity::find()
        .filter(game_rounds::Column::GameId.is_in(game_ids.iter().copied()))
        .order_by_asc(game_rounds::Column::GameId)
        .order_by_asc(game_rounds::Column::RoundNo)
        .all(conn)
        .await
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<game_rounds::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let round = game_rounds::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        round_no: Set(dto.round_no),
        prompt: Set(dto.prompt),
        blank_position: Set(dto.blank_position),
        created_at: Set(now),
    };

    round.insert(conn).await
}

/// Delete every round of a game; choices and matches cascade.
pub async fn delete_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = game_rounds::Entity::delete_many()
        .filter(game_rounds::Column::GameId.eq(game_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
