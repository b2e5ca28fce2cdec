//! Domain entities, lifecycle services, and ports.
//!
//! Purpose: govern which states the four forum entities can reach: soft
//! deletion, the course deactivation precondition, creation reference
//! checks, and the listing contracts. The domain performs no I/O of its own;
//! adapters talk to it through the ports in [`ports`].

pub mod course;
pub mod course_service;
pub mod error;
pub mod ports;
pub mod reply;
pub mod reply_service;
pub mod topic;
pub mod topic_service;
pub mod user;
pub mod user_service;

pub use self::course::{
    Course, CourseDeactivationBlocked, CourseId, CourseSortKey, CourseUpdate, NewCourse,
};
pub use self::course_service::CoursesServiceImpl;
pub use self::error::{Error, ErrorCode};
pub use self::reply::{NewReply, Reply, ReplyId, ReplySortKey, ReplyUpdate};
pub use self::reply_service::RepliesServiceImpl;
pub use self::topic::{NewTopic, Topic, TopicId, TopicSortKey, TopicStatus, TopicUpdate};
pub use self::topic_service::TopicsServiceImpl;
pub use self::user::{NewUser, Profile, User, UserId, UserSortKey, UserUpdate};
pub use self::user_service::UsersServiceImpl;

/// Convenient API result alias.
pub type ApiResult<T> = Result<T, Error>;

/// Raised when a listing query names a sort key the entity does not offer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised sort key: {0}")]
pub struct InvalidSortKey(pub String);
