//! Membership domain model.
//!
//! # Responsibility
//! - Link one member to one sport for a dated, paid period.
//!
//! # Invariants
//! - `member_id` / `sport_id` reference existing rows; storage enforces this.
//! - `start_date <= due_date` and `fee > 0` for a valid membership.
//! - Unknown type/status values are rejected when parsed, so a constructed
//!   `Membership` always carries a known type and status.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

use super::member::MemberId;
use super::sport::SportId;

pub type MembershipId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipType {
    Membership,
    Training,
}

impl MembershipType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Membership => "membership",
            Self::Training => "training",
        }
    }
}

impl FromStr for MembershipType {
    type Err = MembershipValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "membership" => Ok(Self::Membership),
            "training" => Ok(Self::Training),
            other => Err(MembershipValidationError::UnknownType(other.to_string())),
        }
    }
}

/// Persisted as an integer (`Inactive = 0`, `Active = 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipStatus {
    Inactive = 0,
    Active = 1,
}

impl From<MembershipStatus> for i64 {
    fn from(value: MembershipStatus) -> Self {
        value as i64
    }
}

impl TryFrom<i64> for MembershipStatus {
    type Error = MembershipValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            other => Err(MembershipValidationError::UnknownStatus(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    /// `Uuid::nil()` until persisted.
    pub id: MembershipId,
    pub member_id: MemberId,
    pub sport_id: SportId,
    /// Serialized as `type` to match the storage column.
    #[serde(rename = "type")]
    pub kind: MembershipType,
    /// Unix epoch milliseconds.
    pub start_date: i64,
    /// Unix epoch milliseconds. Must not precede `start_date`.
    pub due_date: i64,
    pub status: MembershipStatus,
    pub fee: f64,
}

impl Membership {
    /// Creates an unsaved, active membership.
    pub fn new(
        member_id: MemberId,
        sport_id: SportId,
        kind: MembershipType,
        start_date: i64,
        due_date: i64,
        fee: f64,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            member_id,
            sport_id,
            kind,
            start_date,
            due_date,
            status: MembershipStatus::Active,
            fee,
        }
    }

    pub fn validate(&self) -> Result<(), MembershipValidationError> {
        if self.fee.is_nan() || self.fee <= 0.0 {
            return Err(MembershipValidationError::NonPositiveFee(self.fee));
        }
        if self.start_date > self.due_date {
            return Err(MembershipValidationError::DueBeforeStart {
                start: self.start_date,
                due: self.due_date,
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MembershipValidationError {
    UnknownType(String),
    UnknownStatus(i64),
    NonPositiveFee(f64),
    DueBeforeStart { start: i64, due: i64 },
}

impl Display for MembershipValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType(value) => write!(
                f,
                "unknown membership type `{value}`; expected membership|training"
            ),
            Self::UnknownStatus(value) => write!(f, "unknown membership status `{value}`"),
            Self::NonPositiveFee(fee) => write!(f, "fee must be > 0, got {fee}"),
            Self::DueBeforeStart { start, due } => {
                write!(f, "due_date ({due}) must be >= start_date ({start})")
            }
        }
    }
}

impl Error for MembershipValidationError {}
