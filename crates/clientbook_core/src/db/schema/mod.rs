//! Client book schema setup and teardown.
//!
//! # Responsibility
//! - Create the `clients` and `phones` tables with all storage-level
//!   constraints (uniqueness, CHECKs, foreign key).
//! - Drop both tables in dependency order.
//!
//! # Invariants
//! - `phones` is always dropped before `clients`.
//! - Constraints live in the schema; application code never re-checks them.

use crate::db::DbResult;
use log::info;
use rusqlite::Connection;

/// Table names owned by this schema, in creation order.
pub const SCHEMA_TABLES: [&str; 2] = ["clients", "phones"];

const CREATE_SQL: &str = include_str!("create.sql");
const DROP_SQL: &str = include_str!("drop.sql");
const DROP_IF_EXISTS_SQL: &str = include_str!("drop_if_exists.sql");

/// Creates both tables. No-op for tables that already exist.
pub fn create_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_SQL)?;
    info!("event=schema_create module=schema status=ok");
    Ok(())
}

/// Drops `phones`, then `clients`.
///
/// # Errors
/// - Fails with the storage error when either table does not exist.
pub fn drop_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(DROP_SQL)?;
    info!("event=schema_drop module=schema status=ok mode=strict");
    Ok(())
}

/// Drops both tables when present. Safe to call on an empty database.
pub fn drop_schema_if_exists(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(DROP_IF_EXISTS_SQL)?;
    info!("event=schema_drop module=schema status=ok mode=if_exists");
    Ok(())
}

/// Returns whether both schema tables are present.
pub fn schema_exists(conn: &Connection) -> DbResult<bool> {
    let present: i64 = conn.query_row(
        "SELECT COUNT(*)
         FROM sqlite_master
         WHERE type = 'table'
           AND name IN (?1, ?2);",
        SCHEMA_TABLES,
        |row| row.get(0),
    )?;
    Ok(present == SCHEMA_TABLES.len() as i64)
}

#[cfg(test)]
mod tests {
    use super::{create_schema, drop_schema, drop_schema_if_exists, schema_exists};
    use crate::db::open_db_in_memory;

    #[test]
    fn create_is_idempotent_and_drop_if_exists_tolerates_missing_tables() {
        let conn = open_db_in_memory().unwrap();
        assert!(!schema_exists(&conn).unwrap());

        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();
        assert!(schema_exists(&conn).unwrap());

        drop_schema_if_exists(&conn).unwrap();
        drop_schema_if_exists(&conn).unwrap();
        assert!(!schema_exists(&conn).unwrap());
    }

    #[test]
    fn strict_drop_fails_without_tables() {
        let conn = open_db_in_memory().unwrap();
        assert!(drop_schema(&conn).is_err());
    }
}
