//! Client book domain model.
//!
//! # Responsibility
//! - Define the client/phone data structures used by repositories, search and
//!   services.
//!
//! # Invariants
//! - Clients are identified by a storage-assigned `ClientId`.
//! - Phones are identified by their own number.

pub mod client;
