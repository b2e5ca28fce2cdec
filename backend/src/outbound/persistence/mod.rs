//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   Diesel rows and domain entities. No lifecycle rules live here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) are implementation details, never exposed to the domain.
//! - **Strongly typed errors**: all database failures map to the port error
//!   types.
//!
//! The course adapter owns the cascade: physically removing a course deletes
//! its topics and their replies inside one transaction.

pub(crate) mod diesel_helpers;
mod diesel_course_repository;
mod diesel_reply_repository;
mod diesel_topic_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_reply_repository::DieselReplyRepository;
pub use diesel_topic_repository::DieselTopicRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
