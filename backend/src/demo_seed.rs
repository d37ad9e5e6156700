//! Demo data seeding.
//!
//! Resets the users and posts tables and inserts a small sample data set:
//! two users, three posts. Intended for local development behind the
//! `--seed-demo-data` flag, never for production stores.

use diesel_async::RunQueryDsl;
use tracing::info;
use uuid::Uuid;

use crate::outbound::persistence::schema::{posts, users};
use crate::outbound::persistence::{DbPool, NewPostRow, NewUserRow, PoolError};

/// Errors raised while seeding demo data.
#[derive(Debug, thiserror::Error)]
pub enum DemoSeedError {
    /// No connection could be checked out.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// A seed statement failed.
    #[error("demo seed query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Replace all users and posts with the demo sample set.
pub async fn seed_demo_data(pool: &DbPool) -> Result<(), DemoSeedError> {
    let mut conn = pool.get().await?;

    // Posts reference users, so they go first.
    diesel::delete(posts::table).execute(&mut conn).await?;
    diesel::delete(users::table).execute(&mut conn).await?;

    let alice_id = Uuid::new_v4();
    let bob_id = Uuid::new_v4();
    let sample_users = vec![
        NewUserRow {
            id: alice_id,
            email: "alice@example.com",
            name: Some("Alice"),
        },
        NewUserRow {
            id: bob_id,
            email: "bob@example.com",
            name: Some("Bob"),
        },
    ];
    diesel::insert_into(users::table)
        .values(&sample_users)
        .execute(&mut conn)
        .await?;

    let sample_posts = vec![
        NewPostRow {
            id: Uuid::new_v4(),
            title: "Hello World",
            content: Some("This is my first post!"),
            published: true,
            author_id: alice_id,
        },
        NewPostRow {
            id: Uuid::new_v4(),
            title: "Draft Post",
            content: Some("This is a draft"),
            published: false,
            author_id: alice_id,
        },
        NewPostRow {
            id: Uuid::new_v4(),
            title: "Getting Started",
            content: Some("First steps with the starter backend"),
            published: true,
            author_id: bob_id,
        },
    ];
    diesel::insert_into(posts::table)
        .values(&sample_posts)
        .execute(&mut conn)
        .await?;

    info!(
        users = sample_users.len(),
        posts = sample_posts.len(),
        "demo data seeded"
    );
    Ok(())
}
