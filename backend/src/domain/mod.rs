//! Domain primitives, ports, and application services.
//!
//! Purpose: define the strongly typed core the inbound and outbound
//! adapters plug into. Nothing in here performs I/O directly; persistence
//! is reached through the [`ports`] traits.
//!
//! Public surface:
//! - [`User`], [`UserId`], [`EmailAddress`] — the user entity and its
//!   validated components.
//! - [`CreateUserInput`], [`UserPatch`] — parameter objects for mutations.
//! - [`Error`] / [`ErrorCode`] — transport-agnostic failure payload.
//! - [`GetUsersService`] — the list-users usecase.
//! - [`CachedUsersLoader`] — time-bounded memoization of the usecase.

pub mod error;
pub mod ports;
pub mod user;
pub mod users_loader;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::user::{CreateUserInput, EmailAddress, User, UserId, UserPatch, UserValidationError};
pub use self::users_loader::{CachedUsersLoader, USERS_CACHE_KEY};
pub use self::users_service::{GetUsersResult, GetUsersService};
