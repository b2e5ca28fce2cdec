//! Driving port for user lifecycle operations.
//!
//! Inbound adapters (HTTP handlers) depend on this port so they stay
//! testable without I/O; the domain service implements it against the
//! repository port.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, NewUser, User, UserId, UserSortKey, UserUpdate};

/// Use-case port covering the user CRUD lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Register a new user and return the persisted entity.
    async fn register(&self, draft: NewUser) -> Result<User, Error>;

    /// Page through active users.
    async fn list(&self, sort: UserSortKey, page: PageRequest) -> Result<Page<User>, Error>;

    /// Fetch one user, active or not.
    async fn get(&self, id: UserId) -> Result<User, Error>;

    /// Apply a partial update and return the updated entity.
    async fn update(&self, update: UserUpdate) -> Result<User, Error>;

    /// Soft-delete a user. Succeeds again on repeat calls.
    async fn deactivate(&self, id: UserId) -> Result<(), Error>;
}
