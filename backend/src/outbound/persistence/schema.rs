//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Published posts.
    ///
    /// Indexed on `(author_id, created_at DESC, id)` to serve feed reads.
    posts (id) {
        id -> Text,
        author_id -> Text,
        text -> Text,
        /// Epoch seconds.
        created_at -> Int8,
    }
}

diesel::table! {
    /// Follow edges. `(follower_id, followee_id)` is unique.
    follows (id) {
        id -> Text,
        follower_id -> Text,
        followee_id -> Text,
        /// Epoch seconds.
        created_at -> Int8,
    }
}

diesel::allow_tables_to_appear_in_same_query!(follows, posts);
