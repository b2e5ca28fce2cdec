//! Reply lifecycle service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    RepliesService, ReplyRepository, ReplyRepositoryError, TopicRepository, TopicRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{Error, NewReply, Reply, ReplyId, ReplySortKey, ReplyUpdate, TopicId};

fn map_reply_repository_error(error: ReplyRepositoryError) -> Error {
    match error {
        ReplyRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("reply repository unavailable: {message}"))
        }
        ReplyRepositoryError::Query { message } => {
            Error::internal(format!("reply repository error: {message}"))
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

/// Default implementation of the [`RepliesService`] driving port.
#[derive(Clone)]
pub struct RepliesServiceImpl<R, T, U> {
    replies: Arc<R>,
    topics: Arc<T>,
    users: Arc<U>,
}

impl<R, T, U> RepliesServiceImpl<R, T, U> {
    /// Create the service with the reply repository plus the topic and user
    /// repositories backing the creation reference checks.
    pub fn new(replies: Arc<R>, topics: Arc<T>, users: Arc<U>) -> Self {
        Self {
            replies,
            topics,
            users,
        }
    }
}

#[async_trait]
impl<R, T, U> RepliesService for RepliesServiceImpl<R, T, U>
where
    R: ReplyRepository,
    T: TopicRepository,
    U: UserRepository,
{
    async fn post(&self, draft: NewReply) -> Result<Reply, Error> {
        // Topic first, then user, both before any write.
        if self
            .topics
            .find_by_id(&draft.topic_id)
            .await
            .map_err(map_topic_repository_error)?
            .is_none()
        {
            return Err(Error::not_found("topic not found"));
        }

        if self
            .users
            .find_by_id(&draft.user_id)
            .await
            .map_err(map_user_repository_error)?
            .is_none()
        {
            return Err(Error::not_found("user not found"));
        }

        let reply = Reply::post(draft);
        self.replies
            .save(&reply)
            .await
            .map_err(map_reply_repository_error)?;
        Ok(reply)
    }

    async fn list(
        &self,
        topic_id: Option<TopicId>,
        sort: ReplySortKey,
        page: PageRequest,
    ) -> Result<Page<Reply>, Error> {
        match topic_id {
            Some(topic_id) => self
                .replies
                .list_by_topic(&topic_id, sort, page)
                .await
                .map_err(map_reply_repository_error),
            None => self
                .replies
                .list(sort, page)
                .await
                .map_err(map_reply_repository_error),
        }
    }

    async fn get(&self, id: ReplyId) -> Result<Reply, Error> {
        self.replies
            .find_by_id(&id)
            .await
            .map_err(map_reply_repository_error)?
            .ok_or_else(|| Error::not_found("reply not found"))
    }

    async fn update(&self, update: ReplyUpdate) -> Result<Reply, Error> {
        let mut reply = self
            .replies
            .find_by_id(&update.id)
            .await
            .map_err(map_reply_repository_error)?
            .ok_or_else(|| Error::not_found("reply not found"))?;

        reply.apply_update(&update);
        self.replies
            .save(&reply)
            .await
            .map_err(map_reply_repository_error)?;
        Ok(reply)
    }

    async fn deactivate(&self, id: ReplyId) -> Result<(), Error> {
        let mut reply = self
            .replies
            .find_by_id(&id)
            .await
            .map_err(map_reply_repository_error)?
            .ok_or_else(|| Error::not_found("reply not found"))?;

        reply.deactivate();
        self.replies
            .save(&reply)
            .await
            .map_err(map_reply_repository_error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "reply_service_tests.rs"]
mod tests;
