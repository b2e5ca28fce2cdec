//! Port abstraction for course persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Course, CourseId, CourseSortKey};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
    }
}

/// Port for writing and reading course records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert or update a course record.
    async fn save(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Fetch a course by identifier, active or not.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Page through active courses only; deactivated courses never appear
    /// here.
    async fn list_active(
        &self,
        sort: CourseSortKey,
        page: PageRequest,
    ) -> Result<Page<Course>, CourseRepositoryError>;

    /// Physically remove a course and everything it owns.
    ///
    /// Distinct from deactivation: the course row, its topics, and their
    /// replies are deleted in one unit of work. Either the whole cascade is
    /// visible or none of it. Removing an absent course is a no-op.
    async fn remove(&self, id: &CourseId) -> Result<(), CourseRepositoryError>;
}
