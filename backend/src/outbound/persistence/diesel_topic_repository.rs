//! PostgreSQL-backed `TopicRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest, SortOrder};
use tracing::warn;

use crate::domain::ports::{TopicRepository, TopicRepositoryError};
use crate::domain::{CourseId, Topic, TopicId, TopicSortKey, TopicStatus, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{TopicRecord, TopicRow};
use super::pool::DbPool;
use super::schema::topics;

/// Diesel-backed implementation of the `TopicRepository` port.
#[derive(Clone)]
pub struct DieselTopicRepository {
    pool: DbPool,
}

impl DieselTopicRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> TopicRepositoryError {
    map_diesel_error(
        error,
        TopicRepositoryError::query,
        TopicRepositoryError::connection,
    )
}

fn record_for(topic: &Topic) -> TopicRecord<'_> {
    TopicRecord {
        id: *topic.id.as_uuid(),
        title: &topic.title,
        message: &topic.message,
        created_at: topic.created_at,
        status: topic.status.as_str(),
        active: topic.active,
        user_id: *topic.user_id.as_uuid(),
        course_id: topic.course_id.map(|id| *id.as_uuid()),
    }
}

fn row_to_topic(row: TopicRow) -> Topic {
    let status = TopicStatus::from_label(&row.status).unwrap_or_else(|| {
        warn!(
            value = %row.status,
            topic_id = %row.id,
            "unrecognised status label, defaulting to NO_RESPONSE"
        );
        TopicStatus::NoResponse
    });

    Topic {
        id: TopicId::from_uuid(row.id),
        title: row.title,
        message: row.message,
        created_at: row.created_at,
        status,
        active: row.active,
        user_id: UserId::from_uuid(row.user_id),
        course_id: row.course_id.map(CourseId::from_uuid),
    }
}

#[async_trait]
impl TopicRepository for DieselTopicRepository {
    async fn save(&self, topic: &Topic) -> Result<(), TopicRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TopicRepositoryError::connection))?;

        let record = record_for(topic);
        diesel::insert_into(topics::table)
            .values(&record)
            .on_conflict(topics::id)
            .do_update()
            .set(&record)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TopicRepositoryError::connection))?;

        let row: Option<TopicRow> = topics::table
            .find(*id.as_uuid())
            .select(TopicRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.map(row_to_topic))
    }

    async fn list(
        &self,
        sort: TopicSortKey,
        page: PageRequest,
    ) -> Result<Page<Topic>, TopicRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TopicRepositoryError::connection))?;

        // No active filter: soft-deleted topics stay listed.
        let total: i64 = topics::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        let mut query = topics::table.select(TopicRow::as_select()).into_boxed();
        query = match (sort, page.order()) {
            (TopicSortKey::CreatedAt, SortOrder::Ascending) => {
                query.order(topics::created_at.asc())
            }
            (TopicSortKey::CreatedAt, SortOrder::Descending) => {
                query.order(topics::created_at.desc())
            }
            (TopicSortKey::Title, SortOrder::Ascending) => query.order(topics::title.asc()),
            (TopicSortKey::Title, SortOrder::Descending) => query.order(topics::title.desc()),
        };

        let rows: Vec<TopicRow> = query
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let items = rows.into_iter().map(row_to_topic).collect();
        Ok(Page::from_request(
            items,
            page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn count_by_course(&self, course_id: &CourseId) -> Result<u64, TopicRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, TopicRepositoryError::connection))?;

        let total: i64 = topics::table
            .filter(topics::course_id.eq(*course_id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        Ok(u64::try_from(total).unwrap_or_default())
    }
}
