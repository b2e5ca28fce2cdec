//! Driving port for course lifecycle operations.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Course, CourseId, CourseSortKey, CourseUpdate, Error, NewCourse};

/// Use-case port covering the course CRUD lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesService: Send + Sync {
    /// Register a new course and return the persisted entity.
    async fn register(&self, draft: NewCourse) -> Result<Course, Error>;

    /// Page through active courses.
    async fn list(&self, sort: CourseSortKey, page: PageRequest) -> Result<Page<Course>, Error>;

    /// Fetch one course, active or not.
    async fn get(&self, id: CourseId) -> Result<Course, Error>;

    /// Apply a partial update and return the updated entity.
    async fn update(&self, update: CourseUpdate) -> Result<Course, Error>;

    /// Soft-delete a course. Fails with a conflict while topics still
    /// reference it; the course is left untouched in that case.
    async fn deactivate(&self, id: CourseId) -> Result<(), Error>;
}
