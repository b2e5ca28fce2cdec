//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.
//!
//! Besides the usual reads and upserts, this adapter owns the cascading
//! physical removal: deleting a course deletes its topics and their replies
//! inside a single transaction, so no partial cascade state is ever visible.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest, SortOrder};

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId, CourseSortKey};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{CourseRecord, CourseRow};
use super::pool::DbPool;
use super::schema::{courses, replies, topics};

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

fn record_for(course: &Course) -> CourseRecord<'_> {
    CourseRecord {
        id: *course.id.as_uuid(),
        name: &course.name,
        category: &course.category,
        active: course.active,
        created_at: course.created_at,
    }
}

fn row_to_course(row: CourseRow) -> Course {
    Course {
        id: CourseId::from_uuid(row.id),
        name: row.name,
        category: row.category,
        active: row.active,
        created_at: row.created_at,
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn save(&self, course: &Course) -> Result<(), CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;

        let record = record_for(course);
        diesel::insert_into(courses::table)
            .values(&record)
            .on_conflict(courses::id)
            .do_update()
            .set(&record)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;

        let row: Option<CourseRow> = courses::table
            .find(*id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        Ok(row.map(row_to_course))
    }

    async fn list_active(
        &self,
        sort: CourseSortKey,
        page: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;

        let total: i64 = courses::table
            .filter(courses::active.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;

        let mut query = courses::table
            .filter(courses::active.eq(true))
            .select(CourseRow::as_select())
            .into_boxed();
        query = match (sort, page.order()) {
            (CourseSortKey::Name, SortOrder::Ascending) => query.order(courses::name.asc()),
            (CourseSortKey::Name, SortOrder::Descending) => query.order(courses::name.desc()),
            (CourseSortKey::Category, SortOrder::Ascending) => {
                query.order(courses::category.asc())
            }
            (CourseSortKey::Category, SortOrder::Descending) => {
                query.order(courses::category.desc())
            }
            (CourseSortKey::CreatedAt, SortOrder::Ascending) => {
                query.order(courses::created_at.asc())
            }
            (CourseSortKey::CreatedAt, SortOrder::Descending) => {
                query.order(courses::created_at.desc())
            }
        };

        let rows: Vec<CourseRow> = query
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let items = rows.into_iter().map(row_to_course).collect();
        Ok(Page::from_request(
            items,
            page,
            u64::try_from(total).unwrap_or_default(),
        ))
    }

    async fn remove(&self, id: &CourseId) -> Result<(), CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;

        let course_id = *id.as_uuid();
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                let owned_topics = topics::table
                    .filter(topics::course_id.eq(course_id))
                    .select(topics::id);

                diesel::delete(replies::table.filter(replies::topic_id.eq_any(owned_topics)))
                    .execute(conn)
                    .await?;
                diesel::delete(topics::table.filter(topics::course_id.eq(course_id)))
                    .execute(conn)
                    .await?;
                diesel::delete(courses::table.filter(courses::id.eq(course_id)))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_error)
    }
}
