//! Core persistence layer for the membership-management backend.
//! Owns the entity model, store adapters with domain-error translation, and
//! the use-case services consumed by outer layers.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use db::{open_pool, open_pool_in_memory, ConnectionPool, DbError, PoolConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingError};
pub use model::{
    Member, MemberId, MemberPatch, MemberStatus, Membership, MembershipId, MembershipStatus,
    MembershipType, Sport, SportId, SportPatch, ValidationError,
};
pub use service::{MemberService, MembershipService, ServiceError, ServiceResult, SportService};
pub use store::{
    EntityKind, InMemoryStore, MemberStore, MembershipStore, SportStore, SqliteStore, Store,
    StoreError, StoreErrorKind, StoreResult, Stores,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
