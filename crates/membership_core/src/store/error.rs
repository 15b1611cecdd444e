//! Domain error taxonomy for store operations.
//!
//! # Responsibility
//! - Define storage-agnostic failure kinds returned by every adapter.
//! - Own the single translation point from SQLite result codes to kinds.
//!
//! # Invariants
//! - Every adapter failure carries exactly one `StoreErrorKind`.
//! - The same constraint violation maps to the same kind for every operation.
//! - `Unknown` always keeps the underlying cause.

use crate::db::DbError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

type Cause = Box<dyn Error + Send + Sync + 'static>;

/// Why a store operation failed, independent of the storage engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// Requested identifier/key has no matching record.
    NotFound,
    /// A uniqueness constraint rejected the write.
    AlreadyExists,
    /// A not-null or foreign-key constraint rejected the write.
    MissingRequiredField,
    /// Any other storage failure.
    Unknown,
}

impl StoreErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::MissingRequiredField => "missing_required_field",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for StoreErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Member,
    Sport,
    Membership,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Sport => "sport",
            Self::Membership => "membership",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure returned by store adapters.
///
/// Callers dispatch on [`StoreError::kind`]; the message and cause exist for
/// diagnostics only.
#[derive(Debug)]
pub struct StoreError {
    kind: StoreErrorKind,
    entity: EntityKind,
    message: String,
    cause: Option<Cause>,
}

impl StoreError {
    pub fn not_found(entity: EntityKind, key: impl Display) -> Self {
        Self {
            kind: StoreErrorKind::NotFound,
            entity,
            message: format!("{entity} not found: {key}"),
            cause: None,
        }
    }

    pub fn already_exists(entity: EntityKind, cause: Option<Cause>) -> Self {
        Self {
            kind: StoreErrorKind::AlreadyExists,
            entity,
            message: format!("{entity} already exists"),
            cause,
        }
    }

    pub fn missing_required_field(entity: EntityKind, cause: Option<Cause>) -> Self {
        Self {
            kind: StoreErrorKind::MissingRequiredField,
            entity,
            message: format!("missing required field for {entity}"),
            cause,
        }
    }

    pub fn unknown(entity: EntityKind, operation: &str, cause: impl Into<Cause>) -> Self {
        Self {
            kind: StoreErrorKind::Unknown,
            entity,
            message: format!("failed to {operation} {entity}"),
            cause: Some(cause.into()),
        }
    }

    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == StoreErrorKind::NotFound
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {cause}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Translates a SQLite failure into a domain error.
///
/// This is the only place SQLite result codes are inspected. `key` names the
/// row that was looked up, for `NotFound` messages.
pub(crate) fn classify_sqlite_error(
    entity: EntityKind,
    operation: &str,
    key: impl Display,
    err: rusqlite::Error,
) -> StoreError {
    if matches!(err, rusqlite::Error::QueryReturnedNoRows) {
        return StoreError::not_found(entity, key);
    }

    match constraint_code(&err) {
        Some(ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => {
            StoreError::already_exists(entity, Some(Box::new(err)))
        }
        Some(ffi::SQLITE_CONSTRAINT_NOTNULL | ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => {
            StoreError::missing_required_field(entity, Some(Box::new(err)))
        }
        _ => StoreError::unknown(entity, operation, err),
    }
}

/// Pool checkout failures are never constraint violations.
pub(crate) fn classify_pool_error(
    entity: EntityKind,
    operation: &str,
    err: r2d2::Error,
) -> StoreError {
    StoreError::unknown(entity, operation, DbError::Pool(err))
}

fn constraint_code(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Some(failure.extended_code)
        }
        _ => None,
    }
}
