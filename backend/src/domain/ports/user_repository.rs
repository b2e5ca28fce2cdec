//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{User, UserId, UserSortKey};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Port for writing and reading user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert or update a user record.
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch a user by identifier, active or not.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Page through active users only; deactivated users never appear here.
    async fn list_active(
        &self,
        sort: UserSortKey,
        page: PageRequest,
    ) -> Result<Page<User>, UserRepositoryError>;
}
