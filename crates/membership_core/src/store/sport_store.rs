//! SQLite-backed sport adapter.
//!
//! # Invariants
//! - `name` uniqueness violations surface as `AlreadyExists`.
//! - Deleting a sport still referenced by a membership is rejected by the
//!   foreign key and surfaces as `MissingRequiredField`.

use super::error::{classify_pool_error, classify_sqlite_error, EntityKind, StoreResult};
use super::row::uuid_at;
use super::{log_outcome, SportStore, StoreError};
use crate::db::{ConnectionPool, PooledConnection};
use crate::model::{Sport, SportId};
use rusqlite::{params, Row};
use std::time::Instant;
use uuid::Uuid;

const SPORT_SELECT_SQL: &str = "SELECT id, name, description FROM sports";

const ENTITY: EntityKind = EntityKind::Sport;

/// Sport adapter over a shared connection pool.
#[derive(Clone)]
pub struct SqliteSportStore {
    pool: ConnectionPool,
}

impl SqliteSportStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn conn(&self, operation: &str) -> StoreResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|err| classify_pool_error(ENTITY, operation, err))
    }

    fn insert(&self, sport: &Sport) -> StoreResult<Sport> {
        let conn = self.conn("add")?;
        let id = Uuid::new_v4();
        conn.query_row(
            "INSERT INTO sports (id, name, description)
             VALUES (?1, ?2, ?3)
             RETURNING id, name, description;",
            params![id.to_string(), sport.name.as_str(), sport.description.as_str()],
            sport_from_row,
        )
        .map_err(|err| classify_sqlite_error(ENTITY, "add", id, err))
    }

    fn select_by_id(&self, id: SportId) -> StoreResult<Sport> {
        let conn = self.conn("get")?;
        conn.query_row(
            &format!("{SPORT_SELECT_SQL} WHERE id = ?1;"),
            [id.to_string()],
            sport_from_row,
        )
        .map_err(|err| classify_sqlite_error(ENTITY, "get", id, err))
    }

    fn select_all(&self) -> StoreResult<Vec<Sport>> {
        let conn = self.conn("list")?;
        let load = || -> rusqlite::Result<Vec<Sport>> {
            let mut stmt = conn.prepare(&format!("{SPORT_SELECT_SQL} ORDER BY rowid;"))?;
            let sports = stmt
                .query_map([], sport_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(sports)
        };
        load().map_err(|err| classify_sqlite_error(ENTITY, "list", "*", err))
    }

    fn replace(&self, sport: &Sport) -> StoreResult<Sport> {
        let conn = self.conn("update")?;
        conn.query_row(
            "UPDATE sports
             SET
                name = ?1,
                description = ?2
             WHERE id = ?3
             RETURNING id, name, description;",
            params![
                sport.name.as_str(),
                sport.description.as_str(),
                sport.id.to_string(),
            ],
            sport_from_row,
        )
        .map_err(|err| classify_sqlite_error(ENTITY, "update", sport.id, err))
    }

    fn remove(&self, id: SportId) -> StoreResult<()> {
        let conn = self.conn("delete")?;
        let changed = conn
            .execute("DELETE FROM sports WHERE id = ?1;", [id.to_string()])
            .map_err(|err| classify_sqlite_error(ENTITY, "delete", id, err))?;

        if changed == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

impl SportStore for SqliteSportStore {
    fn add_sport(&self, sport: &Sport) -> StoreResult<Sport> {
        let started_at = Instant::now();
        let result = self.insert(sport);
        log_outcome("sport_add", started_at, result)
    }

    fn get_sport_by_id(&self, id: SportId) -> StoreResult<Sport> {
        let started_at = Instant::now();
        let result = self.select_by_id(id);
        log_outcome("sport_get", started_at, result)
    }

    fn get_all_sports(&self) -> StoreResult<Vec<Sport>> {
        let started_at = Instant::now();
        let result = self.select_all();
        log_outcome("sport_list", started_at, result)
    }

    fn update_sport(&self, sport: &Sport) -> StoreResult<Sport> {
        let started_at = Instant::now();
        let result = self.replace(sport);
        log_outcome("sport_update", started_at, result)
    }

    fn delete_sport(&self, id: SportId) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.remove(id);
        log_outcome("sport_delete", started_at, result)
    }
}

fn sport_from_row(row: &Row<'_>) -> rusqlite::Result<Sport> {
    Ok(Sport {
        id: uuid_at(row, 0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}
