//! Topic lifecycle service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, TopicRepository, TopicRepositoryError, TopicsService,
    UserRepository, UserRepositoryError,
};
use crate::domain::{Error, NewTopic, Topic, TopicId, TopicSortKey, TopicUpdate};

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

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

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

/// Default implementation of the [`TopicsService`] driving port.
#[derive(Clone)]
pub struct TopicsServiceImpl<T, U, C> {
    topics: Arc<T>,
    users: Arc<U>,
    courses: Arc<C>,
}

impl<T, U, C> TopicsServiceImpl<T, U, C> {
    /// Create the service with the topic repository plus the user and course
    /// repositories backing the creation reference checks.
    pub fn new(topics: Arc<T>, users: Arc<U>, courses: Arc<C>) -> Self {
        Self {
            topics,
            users,
            courses,
        }
    }
}

#[async_trait]
impl<T, U, C> TopicsService for TopicsServiceImpl<T, U, C>
where
    T: TopicRepository,
    U: UserRepository,
    C: CourseRepository,
{
    async fn open(&self, draft: NewTopic) -> Result<Topic, Error> {
        // Both reference checks run before anything is written.
        if self
            .users
            .find_by_id(&draft.user_id)
            .await
            .map_err(map_user_repository_error)?
            .is_none()
        {
            return Err(Error::not_found("user not found"));
        }

        if let Some(course_id) = draft.course_id {
            if self
                .courses
                .find_by_id(&course_id)
                .await
                .map_err(map_course_repository_error)?
                .is_none()
            {
                return Err(Error::not_found("course not found"));
            }
        }

        let topic = Topic::open(draft);
        self.topics
            .save(&topic)
            .await
            .map_err(map_topic_repository_error)?;
        Ok(topic)
    }

    async fn list(&self, sort: TopicSortKey, page: PageRequest) -> Result<Page<Topic>, Error> {
        self.topics
            .list(sort, page)
            .await
            .map_err(map_topic_repository_error)
    }

    async fn get(&self, id: TopicId) -> Result<Topic, Error> {
        self.topics
            .find_by_id(&id)
            .await
            .map_err(map_topic_repository_error)?
            .ok_or_else(|| Error::not_found("topic not found"))
    }

    async fn update(&self, update: TopicUpdate) -> Result<Topic, Error> {
        let mut topic = self
            .topics
            .find_by_id(&update.id)
            .await
            .map_err(map_topic_repository_error)?
            .ok_or_else(|| Error::not_found("topic not found"))?;

        topic.apply_update(&update);
        self.topics
            .save(&topic)
            .await
            .map_err(map_topic_repository_error)?;
        Ok(topic)
    }

    async fn deactivate(&self, id: TopicId) -> Result<(), Error> {
        let mut topic = self
            .topics
            .find_by_id(&id)
            .await
            .map_err(map_topic_repository_error)?
            .ok_or_else(|| Error::not_found("topic not found"))?;

        topic.deactivate();
        self.topics
            .save(&topic)
            .await
            .map_err(map_topic_repository_error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "topic_service_tests.rs"]
mod tests;
