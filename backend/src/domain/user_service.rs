//! User lifecycle service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{UserRepository, UserRepositoryError, UsersService};
use crate::domain::{Error, NewUser, User, UserId, UserSortKey, UserUpdate};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Default implementation of the [`UsersService`] driving port.
#[derive(Clone)]
pub struct UsersServiceImpl<R> {
    users: Arc<R>,
}

impl<R> UsersServiceImpl<R> {
    /// Create the service with its repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UsersService for UsersServiceImpl<R>
where
    R: UserRepository,
{
    async fn register(&self, draft: NewUser) -> Result<User, Error> {
        let user = User::register(draft);
        self.users.save(&user).await.map_err(map_repository_error)?;
        Ok(user)
    }

    async fn list(&self, sort: UserSortKey, page: PageRequest) -> Result<Page<User>, Error> {
        self.users
            .list_active(sort, page)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }

    async fn update(&self, update: UserUpdate) -> Result<User, Error> {
        let mut user = self
            .users
            .find_by_id(&update.id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        user.apply_update(&update);
        self.users.save(&user).await.map_err(map_repository_error)?;
        Ok(user)
    }

    async fn deactivate(&self, id: UserId) -> Result<(), Error> {
        let mut user = self
            .users
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("user not found"))?;

        user.deactivate();
        self.users.save(&user).await.map_err(map_repository_error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
