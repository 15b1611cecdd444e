//! Column codecs shared by the SQLite adapters.
//!
//! Malformed persisted values surface as `FromSqlConversionFailure`, which the
//! classifier reports as `Unknown`.

use crate::model::{MemberStatus, MembershipStatus, MembershipType};
use rusqlite::types::{FromSqlError, Type};
use rusqlite::Row;
use uuid::Uuid;

pub(super) fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let text: String = row.get(idx)?;
    Uuid::parse_str(&text)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

pub(super) fn member_status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<MemberStatus> {
    let value: i64 = row.get(idx)?;
    MemberStatus::try_from(value).map_err(|other| out_of_range(idx, other))
}

pub(super) fn membership_status_at(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<MembershipStatus> {
    let value: i64 = row.get(idx)?;
    MembershipStatus::try_from(value).map_err(|_| out_of_range(idx, value))
}

pub(super) fn membership_type_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<MembershipType> {
    let text: String = row.get(idx)?;
    text.parse::<MembershipType>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn out_of_range(idx: usize, value: i64) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        Type::Integer,
        Box::new(FromSqlError::OutOfRange(value)),
    )
}
