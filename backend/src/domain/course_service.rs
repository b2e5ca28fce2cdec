//! Course lifecycle service.
//!
//! Deactivation is the one transition in the domain that can be rejected for
//! a structural reason: the live topic association must be empty. The count
//! comes from the topic repository because ownership is tracked through id
//! back-references, not embedded collections.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::json;

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, CoursesService, TopicRepository, TopicRepositoryError,
};
use crate::domain::{Course, CourseId, CourseSortKey, CourseUpdate, Error, NewCourse};

fn map_course_repository_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

fn map_topic_repository_error(error: TopicRepositoryError) -> Error {
    match error {
        TopicRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("topic repository unavailable: {message}"))
        }
        TopicRepositoryError::Query { message } => {
            Error::internal(format!("topic repository error: {message}"))
        }
    }
}

/// Default implementation of the [`CoursesService`] driving port.
#[derive(Clone)]
pub struct CoursesServiceImpl<C, T> {
    courses: Arc<C>,
    topics: Arc<T>,
}

impl<C, T> CoursesServiceImpl<C, T> {
    /// Create the service with the course repository and the topic
    /// repository backing the deactivation precondition.
    pub fn new(courses: Arc<C>, topics: Arc<T>) -> Self {
        Self { courses, topics }
    }
}

#[async_trait]
impl<C, T> CoursesService for CoursesServiceImpl<C, T>
where
    C: CourseRepository,
    T: TopicRepository,
{
    async fn register(&self, draft: NewCourse) -> Result<Course, Error> {
        let course = Course::register(draft);
        self.courses
            .save(&course)
            .await
            .map_err(map_course_repository_error)?;
        Ok(course)
    }

    async fn list(&self, sort: CourseSortKey, page: PageRequest) -> Result<Page<Course>, Error> {
        self.courses
            .list_active(sort, page)
            .await
            .map_err(map_course_repository_error)
    }

    async fn get(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(&id)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| Error::not_found("course not found"))
    }

    async fn update(&self, update: CourseUpdate) -> Result<Course, Error> {
        let mut course = self
            .courses
            .find_by_id(&update.id)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| Error::not_found("course not found"))?;

        course.apply_update(&update);
        self.courses
            .save(&course)
            .await
            .map_err(map_course_repository_error)?;
        Ok(course)
    }

    async fn deactivate(&self, id: CourseId) -> Result<(), Error> {
        let mut course = self
            .courses
            .find_by_id(&id)
            .await
            .map_err(map_course_repository_error)?
            .ok_or_else(|| Error::not_found("course not found"))?;

        let attached_topics = self
            .topics
            .count_by_course(&id)
            .await
            .map_err(map_topic_repository_error)?;

        course.deactivate(attached_topics).map_err(|blocked| {
            Error::conflict(blocked.to_string()).with_details(json!({
                "courseId": id,
                "topics": blocked.topics,
                "code": "course_has_topics",
            }))
        })?;

        self.courses
            .save(&course)
            .await
            .map_err(map_course_repository_error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
