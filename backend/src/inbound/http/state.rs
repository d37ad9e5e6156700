//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` so they depend
//! only on the repository port and the cached loader, and remain testable
//! without a real store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::UserRepository;
use crate::domain::{CachedUsersLoader, GetUsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Write path: the mutation action talks to the port directly.
    pub repository: Arc<dyn UserRepository>,
    /// Read path: the page load goes through the cached loader.
    pub users: Arc<CachedUsersLoader>,
}

impl HttpState {
    /// Wire the usecase and loader over any repository implementation.
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        let service = GetUsersService::new(repository.clone());
        let users = Arc::new(CachedUsersLoader::new(service, clock));
        Self { repository, users }
    }
}
