//! PostgreSQL-backed `UserRegistry` implementation using Diesel ORM.
//!
//! Lookups read from the replica pool and inserts go to the primary. Every
//! call runs under the configured query deadline; an elapsed deadline drops
//! the in-flight query, returns its connection to the pool and reports
//! [`UserRegistryError::Cancelled`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, error, info, warn};

use crate::domain::User;
use crate::domain::ports::{UserRegistry, UserRegistryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbTargets;
use super::schema::users;

/// Default per-call deadline.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Diesel-backed implementation of the [`UserRegistry`] port.
#[derive(Clone)]
pub struct DieselUserRegistry {
    targets: DbTargets,
    query_timeout: Duration,
}

impl DieselUserRegistry {
    /// Create a registry over the given pools with the default deadline.
    pub fn new(targets: DbTargets) -> Self {
        Self {
            targets,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    /// Override the per-call deadline.
    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    /// Pools backing this registry.
    pub fn targets(&self) -> &DbTargets {
        &self.targets
    }
}

/// Run `work` under `deadline`, mapping expiry to a cancellation.
async fn within_deadline<T, F>(deadline: Duration, work: F) -> Result<T, UserRegistryError>
where
    F: Future<Output = Result<T, UserRegistryError>>,
{
    tokio::time::timeout(deadline, work)
        .await
        .unwrap_or_else(|_| Err(UserRegistryError::cancelled("deadline exceeded")))
}

#[async_trait]
impl UserRegistry for DieselUserRegistry {
    async fn get_user(&self, email: &str) -> Result<User, UserRegistryError> {
        let lookup = async {
            let mut conn = self.targets.replica().get().await.map_err(map_pool_error)?;

            users::table
                .filter(users::email.eq(email))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)
        };

        match within_deadline(self.query_timeout, lookup).await {
            Ok(Some(row)) => Ok(row.into()),
            Ok(None) => {
                debug!(%email, "user not found");
                Err(UserRegistryError::not_found())
            }
            Err(err) => {
                error!(%email, error = %err, "user lookup failed");
                Err(err)
            }
        }
    }

    async fn create_user(&self, user: &User) -> Result<(), UserRegistryError> {
        let birthday = user
            .birthday_date()
            .map_err(|err| UserRegistryError::malformed_input(err.to_string()))?;
        let row = NewUserRow {
            id: *user.id(),
            name: user.name(),
            email: user.email(),
            birthday,
        };

        let insert = async {
            let mut conn = self.targets.primary().get().await.map_err(map_pool_error)?;

            diesel::insert_into(users::table)
                .values(&row)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)
        };

        match within_deadline(self.query_timeout, insert).await {
            Ok(_) => {
                info!(user_id = %user.id(), email = %user.email(), "user created");
                Ok(())
            }
            Err(err) if err.is_duplicate() => {
                warn!(?user, error = %err, "user already registered");
                Err(err)
            }
            Err(err) => {
                error!(?user, error = %err, "user insert failed");
                Err(err)
            }
        }
    }
}
