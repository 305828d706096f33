//! Port abstraction for user lookup and creation.
//!
//! The [`UserRegistry`] trait decouples inbound adapters from any particular
//! storage engine. Implementations must surface uniqueness violations as the
//! dedicated variants below rather than as opaque storage failures, because
//! callers map them to distinct client responses.
//!
//! Cancellation is expressed by dropping the returned future: adapters must
//! release any pooled resource on drop and never report success for work that
//! was abandoned.

use async_trait::async_trait;

use crate::domain::User;

use super::define_port_error;

define_port_error! {
    /// Failure kinds surfaced across the registry boundary.
    pub enum UserRegistryError {
        /// No user matches the lookup key.
        NotFound => "user not found",
        /// Another user already owns the email address.
        EmailAlreadyExists => "user email already exists",
        /// Another user already owns the identifier.
        IdAlreadyExists => "user UUID already exists",
        /// A uniqueness constraint outside the known mapping fired.
        Conflict { constraint: String } => "unique constraint violation: {constraint}",
        /// The user cannot be stored as supplied.
        MalformedInput { message: String } => "malformed user: {message}",
        /// The operation was abandoned before completing.
        Cancelled { message: String } => "operation cancelled: {message}",
        /// Opaque persistence failure.
        Storage { message: String } => "storage error: {message}",
    }
}

impl UserRegistryError {
    /// Return true for the uniqueness violations clients can act upon.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::IdAlreadyExists)
    }
}

/// Registry of users keyed by email, with identifier and email uniqueness.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Fetch the user registered under `email`.
    async fn get_user(&self, email: &str) -> Result<User, UserRegistryError>;

    /// Store a new user.
    ///
    /// Fails with [`UserRegistryError::EmailAlreadyExists`] or
    /// [`UserRegistryError::IdAlreadyExists`] when the user collides with an
    /// existing record; the existing record is left untouched.
    async fn create_user(&self, user: &User) -> Result<(), UserRegistryError>;
}
