//! Port abstraction for reply persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Reply, ReplyId, ReplySortKey, TopicId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by reply repository adapters.
    pub enum ReplyRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "reply repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "reply repository query failed: {message}",
    }
}

/// Port for writing and reading reply records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReplyRepository: Send + Sync {
    /// Insert or update a reply record.
    async fn save(&self, reply: &Reply) -> Result<(), ReplyRepositoryError>;

    /// Fetch a reply by identifier, active or not.
    async fn find_by_id(&self, id: &ReplyId) -> Result<Option<Reply>, ReplyRepositoryError>;

    /// Page through all replies, active and inactive alike.
    async fn list(
        &self,
        sort: ReplySortKey,
        page: PageRequest,
    ) -> Result<Page<Reply>, ReplyRepositoryError>;

    /// Page through the replies of one topic, active and inactive alike.
    async fn list_by_topic(
        &self,
        topic_id: &TopicId,
        sort: ReplySortKey,
        page: PageRequest,
    ) -> Result<Page<Reply>, ReplyRepositoryError>;
}
