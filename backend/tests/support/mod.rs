//! Shared helpers for user registry integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! small helpers live here and are pulled in with `mod support;`.

mod cluster_skip;

pub use cluster_skip::handle_cluster_setup_failure;

use postgres::{Client, NoTls};
use user_registry::outbound::persistence::run_pending_migrations_blocking;

/// Maintenance database every cluster provides.
const MAINTENANCE_DB: &str = "postgres";

/// Render a `postgres` error with its SQLSTATE and detail when available.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`, which
/// hides the message CI logs need.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Drop and recreate `name` so each suite starts from an empty database.
///
/// `database_url_for` maps a database name to a URL on the target cluster.
pub fn reset_database(
    database_url_for: impl Fn(&str) -> String,
    name: &str,
) -> Result<(), String> {
    let mut client = Client::connect(&database_url_for(MAINTENANCE_DB), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    // DROP/CREATE DATABASE cannot share an implicit transaction.
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))
}

/// Apply the embedded migrations and return the versions applied.
pub fn migrate_schema(url: &str) -> Result<Vec<String>, String> {
    run_pending_migrations_blocking(url).map_err(|err| err.to_string())
}

/// Execute raw SQL against `url`.
pub fn execute_sql(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}
