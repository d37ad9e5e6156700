//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation. Regenerate with `diesel print-schema`
//! whenever a migration changes the schema.

diesel::table! {
    /// Application users.
    ///
    /// `email` carries a unique constraint; `updated_at` is set by the
    /// adapter on every update.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique email address used as the human-facing identity.
        email -> Varchar,
        /// Optional display name.
        name -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Posts authored by users. Only reached by the demo seed; no
    /// operational path reads them.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Post title.
        title -> Varchar,
        /// Optional body text.
        content -> Nullable<Text>,
        /// Whether the post is publicly visible.
        published -> Bool,
        /// Owning user; deleting a user cascades to their posts.
        author_id -> Uuid,
    }
}

diesel::joinable!(posts -> users (author_id));
diesel::allow_tables_to_appear_in_same_query!(users, posts);
