use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Expr, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    CreatedAt,
}

#[derive(Iden)]
enum Lessons {
    Table,
    Id,
    Title,
    CreatedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    LessonId,
    Variant,
    TotalRounds,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum GameRounds {
    Table,
    Id,
    GameId,
    RoundNo,
    Prompt,
    BlankPosition,
    CreatedAt,
}

#[derive(Iden)]
enum RoundChoices {
    Table,
    Id,
    RoundId,
    Collection,
    Position,
    Text,
    MediaUrl,
    IsCorrect,
    CreatedAt,
}

#[derive(Iden)]
enum RoundMatches {
    Table,
    Id,
    RoundId,
    LeftChoiceId,
    RightChoiceId,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // lessons
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lessons::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Lessons::Title).string().not_null())
                    .col(ColumnDef::new(Lessons::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Lessons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lessons_created_by")
                            .from(Lessons::Table, Lessons::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // games: one per (lesson, variant)
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::LessonId).big_integer().not_null())
                    .col(ColumnDef::new(Games::Variant).string_len(24).not_null())
                    .col(ColumnDef::new(Games::TotalRounds).small_integer().not_null())
                    .col(ColumnDef::new(Games::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(Games::TotalRounds).gt(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_lesson_id")
                            .from(Games::Table, Games::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_created_by")
                            .from(Games::Table, Games::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_games_lesson_variant")
                    .table(Games::Table)
                    .col(Games::LessonId)
                    .col(Games::Variant)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // game_rounds
        manager
            .create_table(
                Table::create()
                    .table(GameRounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameRounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GameRounds::GameId).big_integer().not_null())
                    .col(
                        ColumnDef::new(GameRounds::RoundNo)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameRounds::Prompt).text().null())
                    .col(ColumnDef::new(GameRounds::BlankPosition).integer().null())
                    .col(
                        ColumnDef::new(GameRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(Expr::col(GameRounds::RoundNo).gt(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_rounds_game_id")
                            .from(GameRounds::Table, GameRounds::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_game_rounds_game_round")
                    .table(GameRounds::Table)
                    .col(GameRounds::GameId)
                    .col(GameRounds::RoundNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // round_choices: OPTIONS for fill-blank / multiple-choice, LEFT/RIGHT for matching
        manager
            .create_table(
                Table::create()
                    .table(RoundChoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundChoices::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoundChoices::RoundId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RoundChoices::Collection)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundChoices::Position)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoundChoices::Text).text().null())
                    .col(ColumnDef::new(RoundChoices::MediaUrl).text().null())
                    .col(ColumnDef::new(RoundChoices::IsCorrect).boolean().null())
                    .col(
                        ColumnDef::new(RoundChoices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .check(
                        Expr::col(RoundChoices::Text)
                            .is_not_null()
                            .or(Expr::col(RoundChoices::MediaUrl).is_not_null()),
                    )
                    .check(Expr::col(RoundChoices::Position).gt(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_choices_round_id")
                            .from(RoundChoices::Table, RoundChoices::RoundId)
                            .to(GameRounds::Table, GameRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_choices_collection_position")
                    .table(RoundChoices::Table)
                    .col(RoundChoices::RoundId)
                    .col(RoundChoices::Collection)
                    .col(RoundChoices::Position)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // round_matches: correct left/right pairs of a matching round
        manager
            .create_table(
                Table::create()
                    .table(RoundMatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoundMatches::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(RoundMatches::RoundId).big_integer().not_null())
                    .col(
                        ColumnDef::new(RoundMatches::LeftChoiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundMatches::RightChoiceId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RoundMatches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_matches_round_id")
                            .from(RoundMatches::Table, RoundMatches::RoundId)
                            .to(GameRounds::Table, GameRounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_matches_left_choice_id")
                            .from(RoundMatches::Table, RoundMatches::LeftChoiceId)
                            .to(RoundChoices::Table, RoundChoices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_matches_right_choice_id")
                            .from(RoundMatches::Table, RoundMatches::RightChoiceId)
                            .to(RoundChoices::Table, RoundChoices::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_matches_left")
                    .table(RoundMatches::Table)
                    .col(RoundMatches::RoundId)
                    .col(RoundMatches::LeftChoiceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_round_matches_right")
                    .table(RoundMatches::Table)
                    .col(RoundMatches::RoundId)
                    .col(RoundMatches::RightChoiceId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children first; indexes go with their tables.
        manager
            .drop_table(Table::drop().table(RoundMatches::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(RoundChoices::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GameRounds::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lessons::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
