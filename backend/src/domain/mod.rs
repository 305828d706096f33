//! Domain primitives and ports.
//!
//! Purpose: define the user entity, its validation rules and the
//! transport-agnostic error type shared by inbound and outbound adapters.
//!
//! Public surface:
//! - User (alias to `user::User`): registered user and birthday validation.
//! - Error (alias to `error::Error`): classified failure with a client message.
//! - ErrorCode (alias to `error::ErrorCode`): stable failure category.
//! - ports: the `UserRegistry` contract and its error taxonomy.

pub mod error;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{
    BIRTHDAY_FORMAT, User, UserValidationError, format_birthday, parse_birthday,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use user_registry::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("user not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
