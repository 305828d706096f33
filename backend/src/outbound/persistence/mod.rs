//! PostgreSQL persistence for the user registry using Diesel ORM.
//!
//! Provides the [`DieselUserRegistry`] adapter over async `bb8` pools from
//! `diesel-async`, plus the embedded schema migrations.
//!
//! - **Thin adapter**: the registry only translates between Diesel rows and
//!   [`crate::domain::User`].
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: driver failures are mapped onto
//!   [`crate::domain::ports::UserRegistryError`].
//!
//! # Example
//!
//! ```ignore
//! use user_registry::outbound::persistence::{DbTargets, DieselUserRegistry, PoolConfig};
//!
//! let targets = DbTargets::connect(PoolConfig::new("postgres://localhost/users"), None).await?;
//! let registry = DieselUserRegistry::new(targets);
//! ```

mod diesel_error_mapping;
mod diesel_user_registry;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_registry::{DEFAULT_QUERY_TIMEOUT, DieselUserRegistry};
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, run_pending_migrations_blocking};
pub use pool::{DbPool, DbTargets, PoolConfig, PoolError};
