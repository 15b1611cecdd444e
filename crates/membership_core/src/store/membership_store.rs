//! SQLite-backed membership adapter.
//!
//! # Invariants
//! - A membership referencing an unknown member or sport is rejected by the
//!   foreign keys and surfaces as `MissingRequiredField`.
//! - Memberships are create-and-read only.

use super::error::{classify_pool_error, classify_sqlite_error, EntityKind, StoreResult};
use super::row::{membership_status_at, membership_type_at, uuid_at};
use super::{log_outcome, MembershipStore};
use crate::db::{ConnectionPool, PooledConnection};
use crate::model::{Membership, MembershipId};
use rusqlite::{params, Row};
use std::time::Instant;
use uuid::Uuid;

const MEMBERSHIP_COLUMNS: &str =
    "id, member_id, sport_id, type, start_date, due_date, status, fee";

const ENTITY: EntityKind = EntityKind::Membership;

/// Membership adapter over a shared connection pool.
#[derive(Clone)]
pub struct SqliteMembershipStore {
    pool: ConnectionPool,
}

impl SqliteMembershipStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn conn(&self, operation: &str) -> StoreResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|err| classify_pool_error(ENTITY, operation, err))
    }

    fn insert(&self, membership: &Membership) -> StoreResult<Membership> {
        let conn = self.conn("add")?;
        let id = Uuid::new_v4();
        conn.query_row(
            &format!(
                "INSERT INTO memberships (
                    id,
                    member_id,
                    sport_id,
                    type,
                    start_date,
                    due_date,
                    status,
                    fee
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                RETURNING {MEMBERSHIP_COLUMNS};"
            ),
            params![
                id.to_string(),
                membership.member_id.to_string(),
                membership.sport_id.to_string(),
                membership.kind.as_str(),
                membership.start_date,
                membership.due_date,
                i64::from(membership.status),
                membership.fee,
            ],
            membership_from_row,
        )
        .map_err(|err| classify_sqlite_error(ENTITY, "add", id, err))
    }

    fn select_by_id(&self, id: MembershipId) -> StoreResult<Membership> {
        let conn = self.conn("get")?;
        conn.query_row(
            &format!("SELECT {MEMBERSHIP_COLUMNS} FROM memberships WHERE id = ?1;"),
            [id.to_string()],
            membership_from_row,
        )
        .map_err(|err| classify_sqlite_error(ENTITY, "get", id, err))
    }

    fn select_all(&self) -> StoreResult<Vec<Membership>> {
        let conn = self.conn("list")?;
        let load = || -> rusqlite::Result<Vec<Membership>> {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MEMBERSHIP_COLUMNS} FROM memberships ORDER BY rowid;"
            ))?;
            let memberships = stmt
                .query_map([], membership_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(memberships)
        };
        load().map_err(|err| classify_sqlite_error(ENTITY, "list", "*", err))
    }
}

impl MembershipStore for SqliteMembershipStore {
    fn add_membership(&self, membership: &Membership) -> StoreResult<Membership> {
        let started_at = Instant::now();
        let result = self.insert(membership);
        log_outcome("membership_add", started_at, result)
    }

    fn get_membership_by_id(&self, id: MembershipId) -> StoreResult<Membership> {
        let started_at = Instant::now();
        let result = self.select_by_id(id);
        log_outcome("membership_get", started_at, result)
    }

    fn get_all_memberships(&self) -> StoreResult<Vec<Membership>> {
        let started_at = Instant::now();
        let result = self.select_all();
        log_outcome("membership_list", started_at, result)
    }
}

fn membership_from_row(row: &Row<'_>) -> rusqlite::Result<Membership> {
    Ok(Membership {
        id: uuid_at(row, 0)?,
        member_id: uuid_at(row, 1)?,
        sport_id: uuid_at(row, 2)?,
        kind: membership_type_at(row, 3)?,
        start_date: row.get(4)?,
        due_date: row.get(5)?,
        status: membership_status_at(row, 6)?,
        fee: row.get(7)?,
    })
}
