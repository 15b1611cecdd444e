//! Connection pool bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Build file or in-memory SQLite pools.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable pool.
//!
//! # Invariants
//! - Pooled connections have `foreign_keys=ON` and a busy timeout.
//! - Returned pools have migrations fully applied.
//! - In-memory pools hold exactly one connection that never expires, since
//!   every SQLite in-memory connection is its own database.

use super::migrations::apply_migrations;
use super::{ConnectionPool, DbResult};
use log::{error, info};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sizing and locking knobs for a file-backed pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of pooled connections.
    pub max_size: u32,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 8,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug)]
struct PragmaCustomizer {
    busy_timeout: Duration,
    wal: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        // Busy timeout first: the pool opens connections concurrently.
        conn.busy_timeout(self.busy_timeout)?;
        if self.wal {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }
}

/// Opens a pool over a SQLite database file and applies pending migrations.
///
/// # Side effects
/// - Creates the database file when missing.
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool(path: impl AsRef<Path>, config: &PoolConfig) -> DbResult<ConnectionPool> {
    let manager = SqliteConnectionManager::file(path);
    let builder = r2d2::Pool::builder()
        .max_size(config.max_size.max(1))
        .connection_timeout(CHECKOUT_TIMEOUT)
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout: config.busy_timeout,
            wal: true,
        }));
    build_pool(builder, manager, "file")
}

/// Opens a single-connection in-memory pool and applies all migrations.
///
/// Used by tests and throwaway tooling; data lives as long as the pool.
pub fn open_pool_in_memory() -> DbResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory();
    let builder = r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(CHECKOUT_TIMEOUT)
        .connection_customizer(Box::new(PragmaCustomizer {
            busy_timeout: PoolConfig::default().busy_timeout,
            wal: false,
        }));
    build_pool(builder, manager, "memory")
}

fn build_pool(
    builder: r2d2::Builder<SqliteConnectionManager>,
    manager: SqliteConnectionManager,
    mode: &str,
) -> DbResult<ConnectionPool> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let pool = match builder.build(manager) {
        Ok(pool) => pool,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match migrate(&pool) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={} max_size={}",
                started_at.elapsed().as_millis(),
                pool.max_size()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn migrate(pool: &ConnectionPool) -> DbResult<()> {
    let mut conn = pool.get()?;
    apply_migrations(&mut conn)
}
