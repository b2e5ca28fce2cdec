//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest, SortOrder};
use tracing::warn;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Profile, User, UserId, UserSortKey};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{UserRecord, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn record_for(user: &User) -> UserRecord<'_> {
    UserRecord {
        id: *user.id.as_uuid(),
        name: &user.name,
        email: &user.email,
        password: &user.password,
        telephone: user.telephone.as_deref(),
        profile: user.profile.as_str(),
        active: user.active,
    }
}

fn row_to_user(row: UserRow) -> User {
    let profile = Profile::from_label(&row.profile).unwrap_or_else(|| {
        warn!(
            value = %row.profile,
            user_id = %row.id,
            "unrecognised profile label, defaulting to USER"
        );
        Profile::User
    });

    User {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        password: row.password,
        telephone: row.telephone,
        profile,
        active: row.active,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn save(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserRepositoryError::connection))?;

        let record = record_for(user);
        diesel::insert_into(users::table)
            .values(&record)
            .on_conflict(users::id)
            .do_update()
            .set(&record)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserRepositoryError::connection))?;

        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.map(row_to_user))
    }

    async fn list_active(
        &self,
        sort: UserSortKey,
        page: PageRequest,
    ) -> Result<Page<User>, UserRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserRepositoryError::connection))?;

        let total: i64 = users::table
            .filter(users::active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        let mut query = users::table
            .filter(users::active.eq(true))
            .select(UserRow::as_select())
            .into_boxed();
        query = match (sort, page.order()) {
            (UserSortKey::Name, SortOrder::Ascending) => query.order(users::name.asc()),
            (UserSortKey::Name, SortOrder::Descending) => query.order(users::name.desc()),
            (UserSortKey::Email, SortOrder::Ascending) => query.order(users::email.asc()),
            (UserSortKey::Email, SortOrder::Descending) => query.order(users::email.desc()),
        };

        let rows: Vec<UserRow> = query
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let items = rows.into_iter().map(row_to_user).collect();
        Ok(Page::from_request(
            items,
            page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }
}
