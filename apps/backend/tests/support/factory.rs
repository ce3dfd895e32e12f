//! Seed rows the games hang off.

use lesson_games::errors::DomainError;
use lesson_games::repos::lessons::{self, Lesson};
use lesson_games::repos::users::{self, User};
use lesson_games_test_support::unique_helpers::{unique_lesson_title, unique_username};
use sea_orm::ConnectionTrait;

pub async fn seed_user<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<User, DomainError> {
    users::create_user(conn, &unique_username()).await
}

pub async fn seed_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Lesson, DomainError> {
    lessons::create_lesson(conn, &unique_lesson_title(), None).await
}

/// A lesson created by a fresh user; returns both.
pub async fn seed_authored_lesson<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<(User, Lesson), DomainError> {
    let user = seed_user(conn).await?;
    let lesson = lessons::create_lesson(conn, &unique_lesson_title(), Some(user.id)).await?;
    Ok((user, lesson))
}
