//! Diesel table definitions for the accounts schema.
//!
//! Mirrors `migrations/`. Regenerate with `diesel print-schema` after a
//! migration changes a column.

diesel::table! {
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        password -> Varchar,
        role -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
