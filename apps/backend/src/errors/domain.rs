//! Domain-level error type used across services and adapters.
//!
//! This error type is HTTP- and DB-agnostic. Boundaries convert it into
//! `crate::error::AppError` through the provided `From` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::SpecViolation;

/// Validation failure kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// The exercise specification broke a rule
    Spec(SpecViolation),
    /// Storage rejected a reference (SQLSTATE 23503)
    ForeignKey,
    /// Storage rejected a row (SQLSTATE 23514)
    Check,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Lesson,
    User,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// One game per (lesson, variant)
    GameSlotTaken,
    Unique,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures; retryable
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(_, d) => write!(f, "validation error: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// The specification violation behind this error, if any.
    pub fn spec_violation(&self) -> Option<&SpecViolation> {
        match self {
            DomainError::Validation(ValidationKind::Spec(v), _) => Some(v),
            _ => None,
        }
    }

    /// Storage failures may succeed when the whole operation is retried;
    /// corrupt data will not.
    pub fn is_retryable(&self) -> bool {
        match self {
            DomainError::Infra(InfraErrorKind::DataCorruption, _) => false,
            DomainError::Infra(..) => true,
            _ => false,
        }
    }
}

impl From<SpecViolation> for DomainError {
    fn from(v: SpecViolation) -> Self {
        let detail = v.to_string();
        DomainError::Validation(ValidationKind::Spec(v), detail)
    }
}
