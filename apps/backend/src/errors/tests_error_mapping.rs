// Unit tests for error mapping - pure domain logic without a database
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use lesson_games_test_support::problem_details::assert_problem_details;

use crate::domain::{GameVariant, SpecRule, SpecViolation};
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_spec_violation_to_422_with_round() {
    let de: DomainError = SpecViolation::round(1, SpecRule::BlankCount(2)).into();
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidGameSpec);
    assert_eq!(app.status().as_u16(), 422);
    assert!(matches!(app, AppError::Validation { round: Some(1), .. }));
}

#[test]
fn maps_variant_mismatch_to_its_own_code() {
    let de: DomainError = SpecViolation::game(SpecRule::VariantMismatch {
        expected: GameVariant::Matching,
        actual: GameVariant::FillBlank,
    })
    .into();
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::VariantMismatch);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_constraint_validation_kinds() {
    let fk: AppError = DomainError::validation(ValidationKind::ForeignKey, "fk").into();
    assert_eq!(fk.code().as_str(), "FK_VIOLATION");
    assert_eq!(fk.status().as_u16(), 422);

    let check: AppError = DomainError::validation(ValidationKind::Check, "check").into();
    assert_eq!(check.code().as_str(), "CHECK_VIOLATION");

    let other: AppError = DomainError::validation_other("bad field").into();
    assert_eq!(other.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_conflicts() {
    let slot = DomainError::conflict(ConflictKind::GameSlotTaken, "slot taken");
    let app: AppError = slot.into();
    assert_eq!(app.code().as_str(), "GAME_SLOT_TAKEN");
    assert_eq!(app.status().as_u16(), 409);

    let unique = DomainError::conflict(ConflictKind::Unique, "duplicate");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_VIOLATION");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    for (kind, code) in [
        (NotFoundKind::Game, "GAME_NOT_FOUND"),
        (NotFoundKind::Lesson, "LESSON_NOT_FOUND"),
        (NotFoundKind::User, "USER_NOT_FOUND"),
        (NotFoundKind::Other("thing".into()), "NOT_FOUND"),
    ] {
        let app: AppError = DomainError::not_found(kind, "missing").into();
        assert_eq!(app.code().as_str(), code);
        assert_eq!(app.status().as_u16(), 404);
    }
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    assert!(t.is_retryable());
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let corr = DomainError::infra(InfraErrorKind::DataCorruption, "bad");
    assert!(!corr.is_retryable());
    let app: AppError = corr.into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert_eq!(app.status().as_u16(), 500);

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "DB_ERROR");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn maps_db_err_through_domain() {
    let err = sea_orm::DbErr::Custom("GAME_NOT_FOUND:42".into());
    let app: AppError = err.into();
    assert_eq!(app.code(), ErrorCode::GameNotFound);
}

#[tokio::test]
async fn renders_problem_details() {
    let de: DomainError = SpecViolation::round(0, SpecRule::CorrectCount(0)).into();
    let app: AppError = de.into();

    let problem = assert_problem_details(
        app.error_response(),
        "INVALID_GAME_SPEC",
        StatusCode::UNPROCESSABLE_ENTITY,
        Some("round 0"),
    )
    .await;
    assert_eq!(problem.title, "Invalid Game Spec");
}

#[tokio::test]
async fn renders_not_found_problem_details() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "game 7 not found").into();
    assert_problem_details(
        app.error_response(),
        "GAME_NOT_FOUND",
        StatusCode::NOT_FOUND,
        Some("game 7"),
    )
    .await;
}
