//! Driving port for topic lifecycle operations.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, NewTopic, Topic, TopicId, TopicSortKey, TopicUpdate};

/// Use-case port covering the topic CRUD lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicsService: Send + Sync {
    /// Open a new topic. The author must resolve; the course, when given,
    /// must resolve too.
    async fn open(&self, draft: NewTopic) -> Result<Topic, Error>;

    /// Page through all topics, active and inactive alike.
    async fn list(&self, sort: TopicSortKey, page: PageRequest) -> Result<Page<Topic>, Error>;

    /// Fetch one topic, active or not.
    async fn get(&self, id: TopicId) -> Result<Topic, Error>;

    /// Apply a partial update and return the updated entity.
    async fn update(&self, update: TopicUpdate) -> Result<Topic, Error>;

    /// Soft-delete a topic. Succeeds again on repeat calls.
    async fn deactivate(&self, id: TopicId) -> Result<(), Error>;
}
