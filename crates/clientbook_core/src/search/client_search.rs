//! Client search over the clients ⟕ phones join.
//!
//! # Responsibility
//! - Filter clients by id, name/email patterns or an exact phone number.
//! - Return raw joined rows; grouping is left to callers
//!   (see `Client::group_rows`).
//!
//! # Invariants
//! - A phone filter takes exclusive priority over every other filter.
//! - Text filters use SQL `LIKE` (`%`, `_`) and are case-sensitive on
//!   connections from `open_db`/`open_db_in_memory`. Connections opened any
//!   other way need `PRAGMA case_sensitive_like = ON` for the same results.
//! - No match yields an empty list, never an error.

use crate::model::client::{ClientId, ClientPhoneRow, PhoneNumber};
use crate::repo::error::RepoResult;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

/// Pattern that matches every value of a text column.
pub const MATCH_ALL: &str = "%";

const CLIENT_JOIN_SELECT_SQL: &str = "SELECT
    c.client_id AS client_id,
    c.first_name AS first_name,
    c.last_name AS last_name,
    c.email AS email,
    p.phone AS phone
FROM clients c
LEFT JOIN phones p ON c.client_id = p.client_id";

const CLIENT_JOIN_ORDER_SQL: &str = " ORDER BY c.client_id ASC, p.phone ASC";

/// Search filters. `ClientQuery::default()` matches every client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientQuery {
    /// Exact identity match when set.
    pub client_id: Option<ClientId>,
    /// `LIKE` pattern for `first_name`.
    pub first_name: String,
    /// `LIKE` pattern for `last_name`.
    pub last_name: String,
    /// `LIKE` pattern for `email`.
    pub email: String,
    /// Exact phone match; when set, all other filters are ignored.
    pub phone: Option<PhoneNumber>,
}

impl Default for ClientQuery {
    fn default() -> Self {
        Self {
            client_id: None,
            first_name: MATCH_ALL.to_string(),
            last_name: MATCH_ALL.to_string(),
            email: MATCH_ALL.to_string(),
            phone: None,
        }
    }
}

impl ClientQuery {
    /// Matches the single client with this identity.
    pub fn by_id(client_id: ClientId) -> Self {
        Self {
            client_id: Some(client_id),
            ..Self::default()
        }
    }

    /// Matches the owner of this phone number.
    pub fn by_phone(phone: PhoneNumber) -> Self {
        Self {
            phone: Some(phone),
            ..Self::default()
        }
    }

    pub fn first_name(mut self, pattern: impl Into<String>) -> Self {
        self.first_name = pattern.into();
        self
    }

    pub fn last_name(mut self, pattern: impl Into<String>) -> Self {
        self.last_name = pattern.into();
        self
    }

    pub fn email(mut self, pattern: impl Into<String>) -> Self {
        self.email = pattern.into();
        self
    }
}

/// Returns every joined (client, phone) row matching `query`.
///
/// A client with several phones appears once per phone; a client without
/// phones appears once with `phone = None`. Rows are ordered by
/// `client_id, phone` for stable output.
pub fn find_clients(conn: &Connection, query: &ClientQuery) -> RepoResult<Vec<ClientPhoneRow>> {
    let mut sql = format!("{CLIENT_JOIN_SELECT_SQL} WHERE ");
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(phone) = query.phone {
        sql.push_str("p.phone = ?");
        bind_values.push(Value::Integer(phone));
    } else {
        sql.push_str("c.first_name LIKE ? AND c.last_name LIKE ? AND c.email LIKE ?");
        bind_values.push(Value::Text(query.first_name.clone()));
        bind_values.push(Value::Text(query.last_name.clone()));
        bind_values.push(Value::Text(query.email.clone()));

        if let Some(client_id) = query.client_id {
            sql.push_str(" AND c.client_id = ?");
            bind_values.push(Value::Integer(client_id));
        }
    }
    sql.push_str(CLIENT_JOIN_ORDER_SQL);

    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut found = Vec::new();
    while let Some(row) = rows.next()? {
        found.push(parse_client_phone_row(row)?);
    }

    Ok(found)
}

fn parse_client_phone_row(row: &Row<'_>) -> RepoResult<ClientPhoneRow> {
    Ok(ClientPhoneRow {
        client_id: row.get("client_id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
    })
}
