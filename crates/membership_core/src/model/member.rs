//! Member domain model.
//!
//! # Responsibility
//! - Define the member record and its status lifecycle.
//! - Validate name, email and phone shape before persistence.
//!
//! # Invariants
//! - `email` is the secondary lookup key; uniqueness is enforced by storage.
//! - `phone_number` is exactly 10 characters.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the store on insert.
pub type MemberId = Uuid;

const MIN_NAME_CHARS: usize = 3;
const PHONE_NUMBER_CHARS: usize = 10;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Whether a member is currently active.
///
/// Persisted as an integer (`Inactive = 0`, `Active = 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    Inactive = 0,
    Active = 1,
}

impl MemberStatus {
    /// Display name used by outer layers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Active => "Active",
        }
    }
}

impl From<MemberStatus> for i64 {
    fn from(value: MemberStatus) -> Self {
        value as i64
    }
}

impl TryFrom<i64> for MemberStatus {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Inactive),
            1 => Ok(Self::Active),
            other => Err(other),
        }
    }
}

/// A club member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// `Uuid::nil()` until persisted.
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    /// Unix epoch milliseconds.
    pub join_date: i64,
    pub status: MemberStatus,
}

impl Member {
    /// Creates an unsaved, active member.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        address: impl Into<String>,
        join_date: i64,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            address: address.into(),
            join_date,
            status: MemberStatus::Active,
        }
    }

    /// Checks field-level business rules.
    ///
    /// # Errors
    /// - Returns the first failing rule in declaration order.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        let name_chars = self.name.chars().count();
        if name_chars < MIN_NAME_CHARS {
            return Err(MemberValidationError::NameTooShort { chars: name_chars });
        }
        if !EMAIL_PATTERN.is_match(&self.email) {
            return Err(MemberValidationError::InvalidEmail(self.email.clone()));
        }
        let phone_chars = self.phone_number.chars().count();
        if phone_chars != PHONE_NUMBER_CHARS {
            return Err(MemberValidationError::InvalidPhoneNumber { chars: phone_chars });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Partial update for a member. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub join_date: Option<i64>,
    pub status: Option<MemberStatus>,
}

impl MemberPatch {
    pub fn apply_to(&self, member: &mut Member) {
        if let Some(name) = &self.name {
            member.name = name.clone();
        }
        if let Some(email) = &self.email {
            member.email = email.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            member.phone_number = phone_number.clone();
        }
        if let Some(address) = &self.address {
            member.address = address.clone();
        }
        if let Some(join_date) = self.join_date {
            member.join_date = join_date;
        }
        if let Some(status) = self.status {
            member.status = status;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    NameTooShort { chars: usize },
    InvalidEmail(String),
    InvalidPhoneNumber { chars: usize },
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooShort { chars } => write!(
                f,
                "name must be at least {MIN_NAME_CHARS} characters, got {chars}"
            ),
            Self::InvalidEmail(email) => write!(f, "email `{email}` is not a valid address"),
            Self::InvalidPhoneNumber { chars } => write!(
                f,
                "phone number must be exactly {PHONE_NUMBER_CHARS} characters, got {chars}"
            ),
        }
    }
}

impl Error for MemberValidationError {}
