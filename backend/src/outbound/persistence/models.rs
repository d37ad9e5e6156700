//! Diesel row structs and changesets.
//!
//! These are internal to the persistence layer; adapters translate them to
//! and from domain types and never leak them upwards.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{posts, users};

/// A full user row as read from the `users` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable user row; timestamps come from column defaults.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: Option<&'a str>,
}

/// Partial update for a user row.
///
/// `updated_at` is always present so the changeset is never empty and the
/// audit column moves on every update.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserRowChangeset<'a> {
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable post row; only the demo seed writes posts.
#[derive(Debug, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPostRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub published: bool,
    pub author_id: Uuid,
}
