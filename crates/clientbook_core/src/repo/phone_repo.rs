//! Phone repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Insert and delete rows of the `phones` table.
//! - List the phones owned by one client.
//!
//! # Invariants
//! - Range, uniqueness and owner existence are checked by the schema; a
//!   rejected insert surfaces as the matching `RepoError` variant.
//! - Deleting a missing number is not an error; callers read the count.

use crate::model::client::{ClientId, PhoneNumber};
use crate::repo::error::{log_write_failure, RepoResult};
use log::debug;
use rusqlite::{params, Connection};

/// Repository interface for phone rows.
pub trait PhoneRepository {
    /// Inserts one phone owned by `client_id`.
    fn add_phone(&self, phone: PhoneNumber, client_id: ClientId) -> RepoResult<()>;
    /// Deletes one phone by number and returns the affected row count.
    fn delete_phone(&self, phone: PhoneNumber) -> RepoResult<usize>;
    /// Deletes every phone of one client and returns the affected row count.
    fn delete_phones_for_client(&self, client_id: ClientId) -> RepoResult<usize>;
    /// Lists one client's phones in ascending order.
    fn list_phones(&self, client_id: ClientId) -> RepoResult<Vec<PhoneNumber>>;
}

/// SQLite-backed phone repository.
///
/// Borrows the caller's connection or transaction and never finishes it.
pub struct SqlitePhoneRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePhoneRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PhoneRepository for SqlitePhoneRepository<'_> {
    fn add_phone(&self, phone: PhoneNumber, client_id: ClientId) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO phones (phone, client_id) VALUES (?1, ?2);",
                params![phone, client_id],
            )
            .map_err(|err| log_write_failure("phone_add", err.into()))?;
        debug!("event=phone_add module=repo status=ok client_id={client_id}");
        Ok(())
    }

    fn delete_phone(&self, phone: PhoneNumber) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM phones WHERE phone = ?1;", [phone])
            .map_err(|err| log_write_failure("phone_delete", err.into()))?;
        debug!("event=phone_delete module=repo status=ok affected={changed}");
        Ok(changed)
    }

    fn delete_phones_for_client(&self, client_id: ClientId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM phones WHERE client_id = ?1;", [client_id])
            .map_err(|err| log_write_failure("phone_delete_all", err.into()))?;
        debug!(
            "event=phone_delete_all module=repo status=ok client_id={client_id} affected={changed}"
        );
        Ok(changed)
    }

    fn list_phones(&self, client_id: ClientId) -> RepoResult<Vec<PhoneNumber>> {
        let mut stmt = self.conn.prepare(
            "SELECT phone
             FROM phones
             WHERE client_id = ?1
             ORDER BY phone ASC;",
        )?;
        let phones = stmt
            .query_map([client_id], |row| row.get::<_, PhoneNumber>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(phones)
    }
}
