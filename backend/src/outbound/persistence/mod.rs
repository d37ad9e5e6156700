//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! Principles:
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain types. No business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never cross into the domain layer.
//! - **Typed errors**: every database failure is mapped to a
//!   `UserRepositoryError` variant before leaving this module.

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{run_pending_migrations, MigrationError};
pub use pool::{DbPool, PoolConfig, PoolError};

pub(crate) use models::{NewPostRow, NewUserRow};
