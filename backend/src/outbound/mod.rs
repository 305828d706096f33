//! Outbound adapters implementing the `UserRegistry` port.
//!
//! - **persistence**: PostgreSQL-backed registry using Diesel ORM
//! - **memory**: in-process registry for tests and local runs
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
pub mod persistence;
