//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `migrations/` exactly.

diesel::table! {
    /// Portal members.
    users (id) {
        id -> Int4,
        username -> Text,
        /// Encoded argon2 hash; never leaves the persistence layer.
        password -> Text,
        discord -> Nullable<Text>,
        role -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    announcements (id) {
        id -> Int4,
        content -> Text,
        created_by -> Nullable<Int4>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Academy forms and police quiz submissions.
    ///
    /// A partial unique index on `(user_id, type) WHERE status = 'pending'`
    /// enforces one pending application per member and type.
    applications (id) {
        id -> Int4,
        user_id -> Int4,
        #[sql_name = "type"]
        kind -> Text,
        char_name -> Nullable<Text>,
        discord -> Nullable<Text>,
        experience -> Nullable<Text>,
        joined_before -> Nullable<Text>,
        protocols -> Jsonb,
        answers -> Jsonb,
        status -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Key to JSON text.
    settings (key) {
        key -> Text,
        value -> Text,
    }
}

diesel::table! {
    ranks (id) {
        id -> Int4,
        title -> Text,
        name -> Text,
        code -> Text,
        #[sql_name = "order"]
        sort_order -> Int4,
    }
}

diesel::table! {
    rules (id) {
        id -> Int4,
        content -> Text,
        category -> Text,
    }
}

diesel::table! {
    tasks (id) {
        id -> Int4,
        content -> Text,
        created_by -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(applications -> users (user_id));
diesel::joinable!(tasks -> users (created_by));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    announcements,
    applications,
    settings,
    ranks,
    rules,
    tasks,
);
