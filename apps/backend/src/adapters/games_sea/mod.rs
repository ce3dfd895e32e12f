//! SeaORM adapter for game headers - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::games;
use crate::infra::db_errors::{not_found_err, GAME_NOT_FOUND};

pub mod dto;

pub use dto::{GameCreate, GameUpdateHeader};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or return the structured `GAME_NOT_FOUND` error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| not_found_err(GAME_NOT_FOUND, game_id))
}

/// All games of a lesson, ordered by id.
pub async fn find_all_by_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    lesson_id: i64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::LessonId.eq(lesson_id))
        .order_by_asc(games::Column::Id)
        .all(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        lesson_id: Set(dto.lesson_id),
        variant: Set(dto.variant),
        total_rounds: Set(dto.total_rounds),
        created_by: Set(dto.created_by),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_active.insert(conn).await
}

/// Set `total_rounds` and bump `updated_at`, then refetch.
pub async fn update_header<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdateHeader,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let result = games::Entity::update_many()
        .col_expr(games::Column::TotalRounds, Expr::value(dto.total_rounds))
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .filter(games::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(not_found_err(GAME_NOT_FOUND, dto.id));
    }

    require_game(conn, dto.id).await
}

/// Delete a game header; rounds, choices and matches cascade.
/// Returns the number of rows removed (0 or 1).
pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = games::Entity::delete_by_id(game_id).exec(conn).await?;
    Ok(result.rows_affected)
}
