//! Error codes for the lesson-games core.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! Every code is SCREAMING_SNAKE_CASE and maps 1:1 to the string that
//! appears in problem-details responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation
    /// General validation error
    ValidationError,
    /// Exercise specification broke a structural or semantic rule
    InvalidGameSpec,
    /// Specification variant differs from the requested or stored one
    VariantMismatch,

    // Resource Not Found
    GameNotFound,
    LessonNotFound,
    UserNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// The lesson already has a game of this variant
    GameSlotTaken,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Database Constraint Violations
    /// Unique constraint violation (SQLSTATE 23505)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514)
    CheckViolation,

    // System Errors
    DbError,
    DbUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Stored rows do not form a valid game graph
    DataCorruption,
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 18] = [
        Self::ValidationError,
        Self::InvalidGameSpec,
        Self::VariantMismatch,
        Self::GameNotFound,
        Self::LessonNotFound,
        Self::UserNotFound,
        Self::NotFound,
        Self::GameSlotTaken,
        Self::Conflict,
        Self::UniqueViolation,
        Self::FkViolation,
        Self::CheckViolation,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::DataCorruption,
        Self::Internal,
        Self::ConfigError,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidGameSpec => "INVALID_GAME_SPEC",
            Self::VariantMismatch => "VARIANT_MISMATCH",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::LessonNotFound => "LESSON_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::GameSlotTaken => "GAME_SLOT_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
