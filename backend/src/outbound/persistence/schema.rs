//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Text snippets with their lifetime.
    snippets (id) {
        /// Store-assigned identifier, starting at one.
        id -> Int8,
        /// Title, at most 100 characters.
        title -> Varchar,
        /// Body text.
        content -> Text,
        /// Insertion time.
        created -> Timestamptz,
        /// Time after which the snippet is hidden.
        expires -> Timestamptz,
    }
}

diesel::table! {
    /// Registered accounts. `email` carries the `users_uc_email` unique
    /// constraint.
    users (id) {
        /// Store-assigned identifier, starting at one.
        id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Login email address.
        email -> Varchar,
        /// bcrypt hash, always 60 characters.
        hashed_password -> Bpchar,
        /// Signup time, defaulted by the database.
        created -> Timestamptz,
        /// Reserved for disabling accounts; always true today.
        active -> Bool,
    }
}

diesel::allow_tables_to_appear_in_same_query!(snippets, users);
