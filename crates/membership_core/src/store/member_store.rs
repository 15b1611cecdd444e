//! SQLite-backed member adapter.
//!
//! # Responsibility
//! - Persist members in the `members` table.
//! - Translate SQLite failures into `StoreError` kinds.
//!
//! # Invariants
//! - Identifiers are generated here on insert; caller-supplied ids are ignored.
//! - `email` uniqueness violations surface as `AlreadyExists`.
//! - Delete decides `NotFound` from the affected-row count.

use super::error::{classify_pool_error, classify_sqlite_error, EntityKind, StoreResult};
use super::row::{member_status_at, uuid_at};
use super::{log_outcome, MemberStore, StoreError};
use crate::db::{ConnectionPool, PooledConnection};
use crate::model::{Member, MemberId};
use rusqlite::{params, Row};
use std::time::Instant;
use uuid::Uuid;

const MEMBER_COLUMNS: &str = "id, name, email, phone, address, join_date, status";

const ENTITY: EntityKind = EntityKind::Member;

/// Member adapter over a shared connection pool.
#[derive(Clone)]
pub struct SqliteMemberStore {
    pool: ConnectionPool,
}

impl SqliteMemberStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn conn(&self, operation: &str) -> StoreResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|err| classify_pool_error(ENTITY, operation, err))
    }

    fn insert(&self, member: &Member) -> StoreResult<Member> {
        let conn = self.conn("add")?;
        let id = Uuid::new_v4();
        conn.query_row(
            &format!(
                "INSERT INTO members (id, name, email, phone, address, join_date, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {MEMBER_COLUMNS};"
            ),
            params![
                id.to_string(),
                member.name.as_str(),
                member.email.as_str(),
                member.phone_number.as_str(),
                member.address.as_str(),
                member.join_date,
                i64::from(member.status),
            ],
            member_from_row,
        )
        .map_err(|err| classify_sqlite_error(ENTITY, "add", id, err))
    }

    fn select_one(&self, operation: &str, column: &str, key: &str) -> StoreResult<Member> {
        let conn = self.conn(operation)?;
        conn.query_row(
            &format!("SELECT {MEMBER_COLUMNS} FROM members WHERE {column} = ?1;"),
            [key],
            member_from_row,
        )
        .map_err(|err| classify_sqlite_error(ENTITY, operation, key, err))
    }

    fn select_all(&self) -> StoreResult<Vec<Member>> {
        let conn = self.conn("list")?;
        let load = || -> rusqlite::Result<Vec<Member>> {
            let mut stmt =
                conn.prepare(&format!("SELECT {MEMBER_COLUMNS} FROM members ORDER BY rowid;"))?;
            let members = stmt
                .query_map([], member_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(members)
        };
        load().map_err(|err| classify_sqlite_error(ENTITY, "list", "*", err))
    }

    fn replace(&self, member: &Member) -> StoreResult<Member> {
        let conn = self.conn("update")?;
        conn.query_row(
            &format!(
                "UPDATE members
                 SET
                    name = ?1,
                    email = ?2,
                    phone = ?3,
                    address = ?4,
                    join_date = ?5,
                    status = ?6
                 WHERE id = ?7
                 RETURNING {MEMBER_COLUMNS};"
            ),
            params![
                member.name.as_str(),
                member.email.as_str(),
                member.phone_number.as_str(),
                member.address.as_str(),
                member.join_date,
                i64::from(member.status),
                member.id.to_string(),
            ],
            member_from_row,
        )
        .map_err(|err| classify_sqlite_error(ENTITY, "update", member.id, err))
    }

    fn remove(&self, id: MemberId) -> StoreResult<()> {
        let conn = self.conn("delete")?;
        let changed = conn
            .execute("DELETE FROM members WHERE id = ?1;", [id.to_string()])
            .map_err(|err| classify_sqlite_error(ENTITY, "delete", id, err))?;

        if changed == 0 {
            return Err(StoreError::not_found(ENTITY, id));
        }

        Ok(())
    }
}

impl MemberStore for SqliteMemberStore {
    fn add_member(&self, member: &Member) -> StoreResult<Member> {
        let started_at = Instant::now();
        let result = self.insert(member);
        log_outcome("member_add", started_at, result)
    }

    fn get_member_by_id(&self, id: MemberId) -> StoreResult<Member> {
        let started_at = Instant::now();
        let result = self.select_one("get", "id", &id.to_string());
        log_outcome("member_get", started_at, result)
    }

    fn get_member_by_email(&self, email: &str) -> StoreResult<Member> {
        let started_at = Instant::now();
        let result = self.select_one("get", "email", email);
        log_outcome("member_get_by_email", started_at, result)
    }

    fn get_all_members(&self) -> StoreResult<Vec<Member>> {
        let started_at = Instant::now();
        let result = self.select_all();
        log_outcome("member_list", started_at, result)
    }

    fn update_member(&self, member: &Member) -> StoreResult<Member> {
        let started_at = Instant::now();
        let result = self.replace(member);
        log_outcome("member_update", started_at, result)
    }

    fn delete_member(&self, id: MemberId) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.remove(id);
        log_outcome("member_delete", started_at, result)
    }
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: uuid_at(row, 0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone_number: row.get(3)?,
        address: row.get(4)?,
        join_date: row.get(5)?,
        status: member_status_at(row, 6)?,
    })
}
