//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for clients and phones.
//! - Isolate SQLite statements from service orchestration.
//!
//! # Invariants
//! - Repositories borrow a caller-owned connection or transaction and never
//!   commit or roll back.
//! - Storage constraint failures are reported as semantic `RepoError`
//!   variants; missing rows on update/delete are reported as zero counts.

pub mod client_repo;
pub mod error;
pub mod phone_repo;
