//! Client repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/delete/read APIs over the `clients` table.
//! - Insert or replace a client's phones as part of client writes.
//!
//! # Invariants
//! - Every operation is one or more statements on the borrowed connection;
//!   nothing here begins, commits or rolls back a transaction.
//! - Multi-statement writes stop at the first failing statement and leave
//!   earlier statements pending in the caller's transaction.
//! - Update/delete of a missing id is reported as zero affected rows.

use crate::model::client::{Client, ClientId, ClientPhoneRow, ClientUpdate, NewClient};
use crate::repo::error::{log_write_failure, RepoResult};
use crate::repo::phone_repo::{PhoneRepository, SqlitePhoneRepository};
use crate::search::client_search::{find_clients, ClientQuery};
use log::debug;
use rusqlite::{params, Connection};

/// Repository interface for client operations.
pub trait ClientRepository {
    /// Inserts the client and its initial phones; returns the new identity.
    fn create_client(&self, client: &NewClient) -> RepoResult<ClientId>;
    /// Overwrites all client fields and applies the phone policy of
    /// [`ClientUpdate`]. Returns the number of client rows updated.
    fn update_client(&self, update: &ClientUpdate) -> RepoResult<usize>;
    /// Deletes the client row. Fails while phones still reference it.
    fn delete_client(&self, client_id: ClientId) -> RepoResult<usize>;
    /// Loads one client with its phones.
    fn get_client(&self, client_id: ClientId) -> RepoResult<Option<Client>>;
    /// Runs the joined client search.
    fn find_clients(&self, query: &ClientQuery) -> RepoResult<Vec<ClientPhoneRow>>;
}

/// SQLite-backed client repository.
///
/// Accepts a plain connection or a `Transaction` (through deref); the caller
/// keeps ownership of the unit of work.
pub struct SqliteClientRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClientRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn phones(&self) -> SqlitePhoneRepository<'conn> {
        SqlitePhoneRepository::new(self.conn)
    }
}

impl ClientRepository for SqliteClientRepository<'_> {
    fn create_client(&self, client: &NewClient) -> RepoResult<ClientId> {
        let client_id: ClientId = self
            .conn
            .query_row(
                "INSERT INTO clients (first_name, last_name, email)
                 VALUES (?1, ?2, ?3)
                 RETURNING client_id;",
                params![
                    client.first_name.as_str(),
                    client.last_name.as_str(),
                    client.email.as_str(),
                ],
                |row| row.get(0),
            )
            .map_err(|err| log_write_failure("client_create", err.into()))?;

        let phones = self.phones();
        for phone in &client.phones {
            phones.add_phone(*phone, client_id)?;
        }

        debug!(
            "event=client_create module=repo status=ok client_id={client_id} phone_count={}",
            client.phones.len()
        );
        Ok(client_id)
    }

    fn update_client(&self, update: &ClientUpdate) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute(
                "UPDATE clients
                 SET
                    first_name = ?1,
                    last_name = ?2,
                    email = ?3
                 WHERE client_id = ?4;",
                params![
                    update.first_name.as_str(),
                    update.last_name.as_str(),
                    update.email.as_str(),
                    update.client_id,
                ],
            )
            .map_err(|err| log_write_failure("client_update", err.into()))?;

        if changed == 0 {
            debug!(
                "event=client_update module=repo status=noop client_id={}",
                update.client_id
            );
            return Ok(0);
        }

        if let Some(replacement) = update.phones.as_ref() {
            let phones = self.phones();
            phones.delete_phones_for_client(update.client_id)?;
            for phone in replacement {
                phones.add_phone(*phone, update.client_id)?;
            }
        }

        debug!(
            "event=client_update module=repo status=ok client_id={} phones_replaced={}",
            update.client_id,
            update.phones.is_some()
        );
        Ok(changed)
    }

    fn delete_client(&self, client_id: ClientId) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM clients WHERE client_id = ?1;", [client_id])
            .map_err(|err| log_write_failure("client_delete", err.into()))?;
        debug!(
            "event=client_delete module=repo status=ok client_id={client_id} affected={changed}"
        );
        Ok(changed)
    }

    fn get_client(&self, client_id: ClientId) -> RepoResult<Option<Client>> {
        let rows = find_clients(self.conn, &ClientQuery::by_id(client_id))?;
        Ok(Client::group_rows(rows).into_iter().next())
    }

    fn find_clients(&self, query: &ClientQuery) -> RepoResult<Vec<ClientPhoneRow>> {
        find_clients(self.conn, query)
    }
}
