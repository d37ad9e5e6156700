//! Domain ports for the hexagonal boundary.
//!
//! Ports express failures as structured, typed error variants so adapters
//! and services can classify them without string matching.

mod user_repository;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{InMemoryUserRepository, UserRepository, UserRepositoryError};
