//! Construction of the HTTP dependency bundle from configuration.

use std::sync::Arc;

use crate::domain::{
    CoursesServiceImpl, RepliesServiceImpl, TopicsServiceImpl, UsersServiceImpl,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselReplyRepository, DieselTopicRepository,
    DieselUserRepository,
};

/// Wire the Diesel-backed repositories into the domain services consumed by
/// the HTTP handlers.
pub(crate) fn build_http_state(pool: &DbPool) -> HttpState {
    let users_repo = Arc::new(DieselUserRepository::new(pool.clone()));
    let courses_repo = Arc::new(DieselCourseRepository::new(pool.clone()));
    let topics_repo = Arc::new(DieselTopicRepository::new(pool.clone()));
    let replies_repo = Arc::new(DieselReplyRepository::new(pool.clone()));

    HttpState {
        users: Arc::new(UsersServiceImpl::new(users_repo.clone())),
        courses: Arc::new(CoursesServiceImpl::new(
            courses_repo.clone(),
            topics_repo.clone(),
        )),
        topics: Arc::new(TopicsServiceImpl::new(
            topics_repo.clone(),
            users_repo.clone(),
            courses_repo,
        )),
        replies: Arc::new(RepliesServiceImpl::new(replies_repo, topics_repo, users_repo)),
    }
}
