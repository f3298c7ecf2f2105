//! Client use-case service.
//!
//! # Responsibility
//! - Provide call-site friendly entry points for client and phone use-cases.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository contracts.
//! - The service never finishes a transaction; callers own the unit of work.

use crate::model::client::{Client, ClientId, ClientPhoneRow, ClientUpdate, NewClient, PhoneNumber};
use crate::repo::client_repo::{ClientRepository, SqliteClientRepository};
use crate::repo::error::RepoResult;
use crate::repo::phone_repo::{PhoneRepository, SqlitePhoneRepository};
use crate::search::client_search::ClientQuery;
use rusqlite::Connection;

/// Use-case service wrapper for client and phone repositories.
pub struct ClientService<C: ClientRepository, P: PhoneRepository> {
    clients: C,
    phones: P,
}

impl<'conn> ClientService<SqliteClientRepository<'conn>, SqlitePhoneRepository<'conn>> {
    /// Builds a service whose repositories share one connection or transaction.
    pub fn sqlite(conn: &'conn Connection) -> Self {
        Self::new(
            SqliteClientRepository::new(conn),
            SqlitePhoneRepository::new(conn),
        )
    }
}

impl<C: ClientRepository, P: PhoneRepository> ClientService<C, P> {
    pub fn new(clients: C, phones: P) -> Self {
        Self { clients, phones }
    }

    /// Creates a client with optional initial phones.
    pub fn create_client(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phones: &[PhoneNumber],
    ) -> RepoResult<ClientId> {
        let client =
            NewClient::new(first_name, last_name, email).with_phones(phones.iter().copied());
        self.clients.create_client(&client)
    }

    /// Overwrites all client fields.
    ///
    /// `phones = Some(list)` replaces the client's phone set; `None` keeps it.
    /// Returns the number of client rows updated (0 when the id is unknown).
    pub fn update_client(
        &self,
        client_id: ClientId,
        first_name: &str,
        last_name: &str,
        email: &str,
        phones: Option<&[PhoneNumber]>,
    ) -> RepoResult<usize> {
        let mut update = ClientUpdate::new(client_id, first_name, last_name, email);
        if let Some(list) = phones {
            update = update.replace_phones(list.iter().copied());
        }
        self.clients.update_client(&update)
    }

    pub fn add_phone(&self, phone: PhoneNumber, client_id: ClientId) -> RepoResult<()> {
        self.phones.add_phone(phone, client_id)
    }

    pub fn delete_phone(&self, phone: PhoneNumber) -> RepoResult<usize> {
        self.phones.delete_phone(phone)
    }

    /// Deletes a client row. Fails while the client still owns phones.
    pub fn delete_client(&self, client_id: ClientId) -> RepoResult<usize> {
        self.clients.delete_client(client_id)
    }

    /// Deletes a client's phones, then the client itself.
    ///
    /// Both statements run on the caller's transaction; a failure of the
    /// second leaves the first pending until the caller rolls back.
    pub fn delete_client_with_phones(&self, client_id: ClientId) -> RepoResult<usize> {
        self.phones.delete_phones_for_client(client_id)?;
        self.clients.delete_client(client_id)
    }

    pub fn get_client(&self, client_id: ClientId) -> RepoResult<Option<Client>> {
        self.clients.get_client(client_id)
    }

    pub fn list_phones(&self, client_id: ClientId) -> RepoResult<Vec<PhoneNumber>> {
        self.phones.list_phones(client_id)
    }

    pub fn find_clients(&self, query: &ClientQuery) -> RepoResult<Vec<ClientPhoneRow>> {
        self.clients.find_clients(query)
    }
}
