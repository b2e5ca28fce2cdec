//! Driving port for reply lifecycle operations.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, NewReply, Reply, ReplyId, ReplySortKey, ReplyUpdate, TopicId};

/// Use-case port covering the reply CRUD lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepliesService: Send + Sync {
    /// Post a new reply. Both the topic and the respondent must resolve
    /// before anything is written.
    async fn post(&self, draft: NewReply) -> Result<Reply, Error>;

    /// Page through replies, optionally scoped to one topic. Inactive
    /// replies are included either way.
    async fn list(
        &self,
        topic_id: Option<TopicId>,
        sort: ReplySortKey,
        page: PageRequest,
    ) -> Result<Page<Reply>, Error>;

    /// Fetch one reply, active or not.
    async fn get(&self, id: ReplyId) -> Result<Reply, Error>;

    /// Apply a partial update and return the updated entity.
    async fn update(&self, update: ReplyUpdate) -> Result<Reply, Error>;

    /// Soft-delete a reply. Succeeds again on repeat calls.
    async fn deactivate(&self, id: ReplyId) -> Result<(), Error>;
}
