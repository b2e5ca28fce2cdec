//! PostgreSQL-backed `ReplyRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest, SortOrder};

use crate::domain::ports::{ReplyRepository, ReplyRepositoryError};
use crate::domain::{Reply, ReplyId, ReplySortKey, TopicId, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{ReplyRecord, ReplyRow};
use super::pool::DbPool;
use super::schema::replies;

/// Diesel-backed implementation of the `ReplyRepository` port.
#[derive(Clone)]
pub struct DieselReplyRepository {
    pool: DbPool,
}

impl DieselReplyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> ReplyRepositoryError {
    map_diesel_error(
        error,
        ReplyRepositoryError::query,
        ReplyRepositoryError::connection,
    )
}

fn record_for(reply: &Reply) -> ReplyRecord<'_> {
    ReplyRecord {
        id: *reply.id.as_uuid(),
        message: &reply.message,
        created_at: reply.created_at,
        solution: reply.solution,
        active: reply.active,
        topic_id: *reply.topic_id.as_uuid(),
        user_id: *reply.user_id.as_uuid(),
    }
}

fn row_to_reply(row: ReplyRow) -> Reply {
    Reply {
        id: ReplyId::from_uuid(row.id),
        message: row.message,
        created_at: row.created_at,
        solution: row.solution,
        active: row.active,
        topic_id: TopicId::from_uuid(row.topic_id),
        user_id: UserId::from_uuid(row.user_id),
    }
}

#[async_trait]
impl ReplyRepository for DieselReplyRepository {
    async fn save(&self, reply: &Reply) -> Result<(), ReplyRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ReplyRepositoryError::connection))?;

        let record = record_for(reply);
        diesel::insert_into(replies::table)
            .values(&record)
            .on_conflict(replies::id)
            .do_update()
            .set(&record)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ReplyId) -> Result<Option<Reply>, ReplyRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ReplyRepositoryError::connection))?;

        let row: Option<ReplyRow> = replies::table
            .find(*id.as_uuid())
            .select(ReplyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.map(row_to_reply))
    }

    async fn list(
        &self,
        sort: ReplySortKey,
        page: PageRequest,
    ) -> Result<Page<Reply>, ReplyRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ReplyRepositoryError::connection))?;

        // No active filter: soft-deleted replies stay listed.
        let total: i64 = replies::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        let mut query = replies::table.select(ReplyRow::as_select()).into_boxed();
        query = match (sort, page.order()) {
            (ReplySortKey::CreatedAt, SortOrder::Ascending) => {
                query.order(replies::created_at.asc())
            }
            (ReplySortKey::CreatedAt, SortOrder::Descending) => {
                query.order(replies::created_at.desc())
            }
        };

        let rows: Vec<ReplyRow> = query
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let items = rows.into_iter().map(row_to_reply).collect();
        Ok(Page::from_request(
            items,
            page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn list_by_topic(
        &self,
        topic_id: &TopicId,
        sort: ReplySortKey,
        page: PageRequest,
    ) -> Result<Page<Reply>, ReplyRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ReplyRepositoryError::connection))?;

        let scope = *topic_id.as_uuid();
        let total: i64 = replies::table
            .filter(replies::topic_id.eq(scope))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        let mut query = replies::table
            .filter(replies::topic_id.eq(scope))
            .select(ReplyRow::as_select())
            .into_boxed();
        query = match (sort, page.order()) {
            (ReplySortKey::CreatedAt, SortOrder::Ascending) => {
                query.order(replies::created_at.asc())
            }
            (ReplySortKey::CreatedAt, SortOrder::Descending) => {
                query.order(replies::created_at.desc())
            }
        };

        let rows: Vec<ReplyRow> = query
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let items = rows.into_iter().map(row_to_reply).collect();
        Ok(Page::from_request(
            items,
            page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }
}
