//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters in
//! the outbound layer; driving ports (`*Service`) are implemented by the
//! domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_repository;
mod courses_service;
mod replies_service;
mod reply_repository;
mod topic_repository;
mod topics_service;
mod user_repository;
mod users_service;

#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use courses_service::MockCoursesService;
pub use courses_service::CoursesService;
#[cfg(test)]
pub use replies_service::MockRepliesService;
pub use replies_service::RepliesService;
#[cfg(test)]
pub use reply_repository::MockReplyRepository;
pub use reply_repository::{ReplyRepository, ReplyRepositoryError};
#[cfg(test)]
pub use topic_repository::MockTopicRepository;
pub use topic_repository::{TopicRepository, TopicRepositoryError};
#[cfg(test)]
pub use topics_service::MockTopicsService;
pub use topics_service::TopicsService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_service::MockUsersService;
pub use users_service::UsersService;
