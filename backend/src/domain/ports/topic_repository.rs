//! Port abstraction for topic persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{CourseId, Topic, TopicId, TopicSortKey};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by topic repository adapters.
    pub enum TopicRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "topic repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "topic repository query failed: {message}",
    }
}

/// Port for writing and reading topic records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// Insert or update a topic record.
    async fn save(&self, topic: &Topic) -> Result<(), TopicRepositoryError>;

    /// Fetch a topic by identifier, active or not.
    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicRepositoryError>;

    /// Page through all topics, active and inactive alike.
    async fn list(
        &self,
        sort: TopicSortKey,
        page: PageRequest,
    ) -> Result<Page<Topic>, TopicRepositoryError>;

    /// Count every topic referencing the course, regardless of the topics'
    /// `active` flags. Feeds the course deactivation precondition.
    async fn count_by_course(&self, course_id: &CourseId) -> Result<u64, TopicRepositoryError>;
}
