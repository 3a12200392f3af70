//! Diesel table definitions.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Credential store. `username` carries a unique index.
    users (id) {
        id -> Int4,
        #[max_length = 50]
        username -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        #[max_length = 20]
        role -> Varchar,
    }
}

diesel::table! {
    /// Book catalogue.
    books (id) {
        id -> Int4,
        #[max_length = 100]
        title -> Varchar,
        #[max_length = 100]
        author -> Varchar,
    }
}
