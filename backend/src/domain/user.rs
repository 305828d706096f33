//! User data model.
//!
//! A [`User`] is deliberately permissive: only the birthday carries a format
//! constraint. Email and name are opaque strings and are never inspected.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Calendar-date layout accepted for birthdays.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// Validation errors returned by [`User::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    MalformedBirthday,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedBirthday => write!(f, "user malformed birthday"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Parse a birthday string in its canonical `YYYY-MM-DD` form.
///
/// The parsed date must format back to the exact input, which rejects
/// unpadded fields such as `1999-1-5` that chrono would otherwise accept.
///
/// # Examples
/// ```
/// use user_registry::domain::parse_birthday;
///
/// assert!(parse_birthday("1999-12-31").is_ok());
/// assert!(parse_birthday("31/12/1999").is_err());
/// ```
pub fn parse_birthday(raw: &str) -> Result<NaiveDate, UserValidationError> {
    let date = NaiveDate::parse_from_str(raw, BIRTHDAY_FORMAT)
        .map_err(|_| UserValidationError::MalformedBirthday)?;
    if format_birthday(date) != raw {
        return Err(UserValidationError::MalformedBirthday);
    }
    Ok(date)
}

/// Render a stored date in the canonical birthday form.
pub fn format_birthday(date: NaiveDate) -> String {
    date.format(BIRTHDAY_FORMAT).to_string()
}

/// Registered user.
///
/// ## Invariants
/// - `id` and `email` are unique across the registry (enforced by storage).
/// - `birthday` must satisfy [`parse_birthday`] before the user is persisted;
///   call [`User::validate`] first.
///
/// Serialises as `{"ID":..,"Name":..,"Email":..,"Birthday":..}` in that order.
/// Decoding also accepts all-lowercase and all-uppercase keys. An absent
/// field takes its empty value (the nil UUID or `""`), so a missing birthday
/// surfaces as a validation failure rather than a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[serde(rename = "ID", alias = "id", alias = "Id", default)]
    #[schema(value_type = String, example = "9d225408-6a94-49e7-8e04-69ff654e0ff4")]
    id: Uuid,
    #[serde(rename = "Name", alias = "name", alias = "NAME", default)]
    #[schema(example = "Alice")]
    name: String,
    #[serde(rename = "Email", alias = "email", alias = "EMAIL", default)]
    #[schema(example = "alice@example.com")]
    email: String,
    #[serde(rename = "Birthday", alias = "birthday", alias = "BIRTHDAY", default)]
    #[schema(example = "1999-12-31")]
    birthday: String,
}

impl User {
    /// Construct a user from raw parts without validating them.
    ///
    /// # Examples
    /// ```
    /// use user_registry::domain::User;
    /// use uuid::Uuid;
    ///
    /// let user = User::new(Uuid::new_v4(), "Alice", "alice@example.com", "1999-12-31");
    /// assert!(user.validate().is_ok());
    /// ```
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        email: impl Into<String>,
        birthday: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            birthday: birthday.into(),
        }
    }

    /// Rebuild a user from stored columns, rendering the date canonically.
    pub fn from_parts(id: Uuid, name: String, email: String, birthday: NaiveDate) -> Self {
        Self {
            id,
            name,
            email,
            birthday: format_birthday(birthday),
        }
    }

    /// Check the birthday format. No other field is validated.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        self.birthday_date().map(|_| ())
    }

    /// Parsed birthday, failing when the string is not a canonical date.
    pub fn birthday_date(&self) -> Result<NaiveDate, UserValidationError> {
        parse_birthday(&self.birthday)
    }

    /// Unique identifier.
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    /// Free-text name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Lookup key.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Birthday exactly as supplied or as rendered from storage.
    pub fn birthday(&self) -> &str {
        self.birthday.as_str()
    }
}
