//! Use-case services over the store capabilities.
//!
//! # Responsibility
//! - Run business-rule validation before every store write.
//! - Implement partial updates as fetch, patch, validate, replace.
//! - Keep outer layers (HTTP handlers, CLI) decoupled from storage details.
//!
//! # Invariants
//! - Services never bypass the store's error classification; store failures
//!   are returned unchanged inside `ServiceError::Store`.

pub mod member_service;
pub mod membership_service;
pub mod sport_service;

use crate::model::{
    MemberValidationError, MembershipValidationError, SportValidationError, ValidationError,
};
use crate::store::{StoreError, StoreErrorKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use member_service::MemberService;
pub use membership_service::MembershipService;
pub use sport_service::SportService;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Entity failed `validate()`; nothing was written.
    Invalid(ValidationError),
    /// Store rejected or failed the operation.
    Store(StoreError),
}

impl ServiceError {
    /// Domain kind of a store failure, `None` for validation failures.
    pub fn store_kind(&self) -> Option<StoreErrorKind> {
        match self {
            Self::Invalid(_) => None,
            Self::Store(err) => Some(err.kind()),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<MemberValidationError> for ServiceError {
    fn from(value: MemberValidationError) -> Self {
        Self::Invalid(value.into())
    }
}

impl From<SportValidationError> for ServiceError {
    fn from(value: SportValidationError) -> Self {
        Self::Invalid(value.into())
    }
}

impl From<MembershipValidationError> for ServiceError {
    fn from(value: MembershipValidationError) -> Self {
        Self::Invalid(value.into())
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
