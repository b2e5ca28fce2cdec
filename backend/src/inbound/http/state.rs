//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CoursesService, RepliesService, TopicsService, UsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User lifecycle use-cases.
    pub users: Arc<dyn UsersService>,
    /// Course lifecycle use-cases.
    pub courses: Arc<dyn CoursesService>,
    /// Topic lifecycle use-cases.
    pub topics: Arc<dyn TopicsService>,
    /// Reply lifecycle use-cases.
    pub replies: Arc<dyn RepliesService>,
}
