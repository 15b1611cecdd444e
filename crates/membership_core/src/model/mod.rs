//! Domain model for members, sports and memberships.
//!
//! # Responsibility
//! - Define the plain records persisted by the store adapters.
//! - Own business-rule validation (`validate()` / `is_valid()`).
//!
//! # Invariants
//! - Identifiers are `Uuid::nil()` until the store assigns one on insert.
//! - Timestamps are Unix epoch milliseconds.
//! - Validation is pure and never performed by the store itself.

pub mod member;
pub mod membership;
pub mod sport;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub use member::{Member, MemberId, MemberPatch, MemberStatus, MemberValidationError};
pub use membership::{
    Membership, MembershipId, MembershipStatus, MembershipType, MembershipValidationError,
};
pub use sport::{Sport, SportId, SportPatch, SportValidationError};

/// Business-rule failure for any entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Member(MemberValidationError),
    Sport(SportValidationError),
    Membership(MembershipValidationError),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member(err) => write!(f, "invalid member: {err}"),
            Self::Sport(err) => write!(f, "invalid sport: {err}"),
            Self::Membership(err) => write!(f, "invalid membership: {err}"),
        }
    }
}

impl Error for ValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Member(err) => Some(err),
            Self::Sport(err) => Some(err),
            Self::Membership(err) => Some(err),
        }
    }
}

impl From<MemberValidationError> for ValidationError {
    fn from(value: MemberValidationError) -> Self {
        Self::Member(value)
    }
}

impl From<SportValidationError> for ValidationError {
    fn from(value: SportValidationError) -> Self {
        Self::Sport(value)
    }
}

impl From<MembershipValidationError> for ValidationError {
    fn from(value: MembershipValidationError) -> Self {
        Self::Membership(value)
    }
}
