//! Client and phone domain model.
//!
//! # Responsibility
//! - Define write inputs (`NewClient`, `ClientUpdate`) and read models
//!   (`Client`, `ClientPhoneRow`) shared by repositories and services.
//! - Publish the valid phone-number range.
//!
//! # Invariants
//! - `client_id` is assigned by storage and never reused while the row exists.
//! - Every phone number belongs to exactly one client.
//! - Field constraints (non-empty names, unique email containing `@`, phone
//!   range) are enforced by the schema, not by these types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Storage-assigned client identity.
pub type ClientId = i64;

/// Phone number stored as a plain integer (country prefix included).
pub type PhoneNumber = i64;

/// Smallest phone number accepted by the `phones` table.
pub const PHONE_NUMBER_MIN: PhoneNumber = 70_000_000_000;
/// Largest phone number accepted by the `phones` table.
pub const PHONE_NUMBER_MAX: PhoneNumber = 80_000_000_000;

/// Inclusive range enforced by the `phones.phone` CHECK constraint.
pub const PHONE_NUMBER_RANGE: RangeInclusive<PhoneNumber> = PHONE_NUMBER_MIN..=PHONE_NUMBER_MAX;

/// Returns whether `phone` falls inside the storage-accepted range.
///
/// Informational only; writes still rely on the storage CHECK.
pub fn phone_in_range(phone: PhoneNumber) -> bool {
    PHONE_NUMBER_RANGE.contains(&phone)
}

/// Input for creating one client with optional initial phones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Inserted in order after the client row; may be empty.
    #[serde(default)]
    pub phones: Vec<PhoneNumber>,
}

impl NewClient {
    /// Creates a client input without phones.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phones: Vec::new(),
        }
    }

    /// Replaces the initial phone list.
    pub fn with_phones(mut self, phones: impl IntoIterator<Item = PhoneNumber>) -> Self {
        self.phones = phones.into_iter().collect();
        self
    }
}

/// Full overwrite of one client's fields.
///
/// `phones: None` leaves existing phone rows untouched. `Some(list)` replaces
/// the client's phone set with exactly `list` (an empty list removes all
/// phones).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub client_id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phones: Option<Vec<PhoneNumber>>,
}

impl ClientUpdate {
    /// Creates an update that keeps the client's phones as they are.
    pub fn new(
        client_id: ClientId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phones: None,
        }
    }

    /// Requests a full replacement of the client's phone set.
    pub fn replace_phones(mut self, phones: impl IntoIterator<Item = PhoneNumber>) -> Self {
        self.phones = Some(phones.into_iter().collect());
        self
    }
}

/// One raw row of the clients ⟕ phones join returned by search.
///
/// A client with several phones yields several rows; a client without phones
/// yields one row with `phone = None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPhoneRow {
    pub client_id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<PhoneNumber>,
}

/// Client read model with its phones collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Ascending phone numbers owned by this client.
    pub phones: Vec<PhoneNumber>,
}

impl Client {
    /// Folds joined search rows into clients, preserving first-seen order.
    ///
    /// Rows for the same `client_id` need not be adjacent.
    pub fn group_rows(rows: impl IntoIterator<Item = ClientPhoneRow>) -> Vec<Client> {
        let mut clients: Vec<Client> = Vec::new();
        let mut index_by_id: HashMap<ClientId, usize> = HashMap::new();
        for row in rows {
            let index = *index_by_id.entry(row.client_id).or_insert_with(|| {
                clients.push(Client {
                    client_id: row.client_id,
                    first_name: row.first_name,
                    last_name: row.last_name,
                    email: row.email,
                    phones: Vec::new(),
                });
                clients.len() - 1
            });
            let client = &mut clients[index];
            if let Some(phone) = row.phone {
                client.phones.push(phone);
            }
        }
        for client in &mut clients {
            client.phones.sort_unstable();
        }
        clients
    }
}

impl Display for ClientPhoneRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | ",
            self.client_id, self.first_name, self.last_name, self.email
        )?;
        match self.phone {
            Some(phone) => write!(f, "{phone}"),
            None => write!(f, "-"),
        }
    }
}
