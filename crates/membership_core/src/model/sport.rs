//! Sport domain model.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type SportId = Uuid;

const MIN_NAME_CHARS: usize = 3;

/// A sport offered by the club. `name` is unique in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    /// `Uuid::nil()` until persisted.
    pub id: SportId,
    pub name: String,
    pub description: String,
}

impl Sport {
    /// Creates an unsaved sport.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::nil(),
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), SportValidationError> {
        let chars = self.name.chars().count();
        if chars < MIN_NAME_CHARS {
            return Err(SportValidationError::NameTooShort { chars });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Partial update for a sport. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SportPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl SportPatch {
    pub fn apply_to(&self, sport: &mut Sport) {
        if let Some(name) = &self.name {
            sport.name = name.clone();
        }
        if let Some(description) = &self.description {
            sport.description = description.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SportValidationError {
    NameTooShort { chars: usize },
}

impl Display for SportValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameTooShort { chars } => write!(
                f,
                "name must be at least {MIN_NAME_CHARS} characters, got {chars}"
            ),
        }
    }
}

impl Error for SportValidationError {}
