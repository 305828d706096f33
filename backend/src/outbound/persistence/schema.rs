//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Registered users.
    ///
    /// `id` is the primary key (constraint `users_id_key`) and `email` carries
    /// the `users_email_key` unique constraint.
    users (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        birthday -> Date,
    }
}
