//! Diesel and pool failures mapped onto the registry error taxonomy.
//!
//! Uniqueness violations are classified through an explicit constraint table.
//! Anything outside the table becomes a generic conflict rather than a guess.
//! Other driver failures collapse to client-safe storage messages; the raw
//! detail is only logged.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::UserRegistryError;

use super::pool::PoolError;

/// Unique constraint names on the users table and the errors they raise.
const UNIQUE_CONSTRAINTS: &[(&str, fn() -> UserRegistryError)] = &[
    ("users_email_key", UserRegistryError::email_already_exists),
    ("users_id_key", UserRegistryError::id_already_exists),
];

const CONNECTION_MESSAGE: &str = "database connection error";
const QUERY_MESSAGE: &str = "database error";

/// Classify a uniqueness violation by the constraint that fired.
pub(super) fn classify_unique_violation(constraint: Option<&str>) -> UserRegistryError {
    let known = constraint.and_then(|name| {
        UNIQUE_CONSTRAINTS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, make)| make())
    });
    match known {
        Some(error) => error,
        None => {
            warn!(
                constraint = ?constraint,
                "unrecognised unique constraint violation"
            );
            UserRegistryError::conflict(constraint.unwrap_or("unknown"))
        }
    }
}

/// Map pool failures to a storage error.
pub(super) fn map_pool_error(error: PoolError) -> UserRegistryError {
    debug!(error = %error, "user registry pool checkout failed");
    UserRegistryError::storage(CONNECTION_MESSAGE)
}

/// Map Diesel errors to registry errors.
pub(super) fn map_diesel_error(error: DieselError) -> UserRegistryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => UserRegistryError::not_found(),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            classify_unique_violation(info.constraint_name())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserRegistryError::storage(CONNECTION_MESSAGE)
        }
        _ => UserRegistryError::storage(QUERY_MESSAGE),
    }
}
