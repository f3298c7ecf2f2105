//! Data-access layer for clients and their phone numbers.
//!
//! Every operation runs hand-written parameterized statements on a
//! caller-supplied connection or transaction; the caller decides when to
//! commit or roll back.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::schema::{create_schema, drop_schema, drop_schema_if_exists, schema_exists};
pub use db::{open_db, open_db_in_memory, with_unit_of_work, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::client::{
    phone_in_range, Client, ClientId, ClientPhoneRow, ClientUpdate, NewClient, PhoneNumber,
    PHONE_NUMBER_MAX, PHONE_NUMBER_MIN, PHONE_NUMBER_RANGE,
};
pub use repo::client_repo::{ClientRepository, SqliteClientRepository};
pub use repo::error::{RepoError, RepoResult};
pub use repo::phone_repo::{PhoneRepository, SqlitePhoneRepository};
pub use search::client_search::{find_clients, ClientQuery, MATCH_ALL};
pub use service::client_service::ClientService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
