//! Client search entry points.
//!
//! # Responsibility
//! - Expose the filtered clients ⟕ phones query.
//! - Keep result shaping (raw joined rows) inside core.

pub mod client_search;
