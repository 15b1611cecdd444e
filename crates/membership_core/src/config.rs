//! Runtime configuration for binaries embedding the core.
//!
//! # Responsibility
//! - Load settings from an optional `app.env` file plus process environment.
//! - Apply defaults and reject malformed values early.
//!
//! # Invariants
//! - Process environment wins over `app.env` (dotenvy never overrides set vars).
//! - Loading never panics.

use crate::db::PoolConfig;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_FILE_NAME: &str = "app.env";
pub const DEFAULT_DB_PATH: &str = "membership.db";

const DB_PATH_KEY: &str = "DB_PATH";
const DB_POOL_SIZE_KEY: &str = "DB_POOL_SIZE";
const LOG_LEVEL_KEY: &str = "LOG_LEVEL";
const LOG_DIR_KEY: &str = "LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub pool_size: u32,
    pub log_level: String,
    /// File logging is enabled only when set.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    EnvFile(dotenvy::Error),
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvFile(err) => write!(f, "failed to read {ENV_FILE_NAME}: {err}"),
            Self::InvalidValue { key, value } => write!(f, "invalid value `{value}` for {key}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EnvFile(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl AppConfig {
    /// Reads `<dir>/app.env` when present, then the process environment.
    ///
    /// # Errors
    /// - `EnvFile` when `app.env` exists but cannot be parsed.
    /// - `InvalidValue` when a setting is malformed.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match dotenvy::from_path(dir.as_ref().join(ENV_FILE_NAME)) {
            Ok(()) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(ConfigError::EnvFile(err)),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let pool_size = match non_empty(DB_POOL_SIZE_KEY) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: DB_POOL_SIZE_KEY,
                        value: raw,
                    })
                }
            },
            None => PoolConfig::default().max_size,
        };

        let log_dir = non_empty(LOG_DIR_KEY).map(PathBuf::from);
        if let Some(dir) = &log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: LOG_DIR_KEY,
                    value: dir.display().to_string(),
                });
            }
        }

        Ok(Self {
            db_path: non_empty(DB_PATH_KEY)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH)),
            pool_size,
            log_level: non_empty(LOG_LEVEL_KEY)
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
        })
    }

    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_size: self.pool_size,
            ..PoolConfig::default()
        }
    }
}
