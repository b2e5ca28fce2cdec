//! Course data model.
//!
//! A course exclusively owns its topics: physically removing a course removes
//! the topics (and their replies) in the same unit of work. Deactivation is
//! logical and is the only operation in the domain blocked by a structural
//! precondition: a course still referenced by topics keeps its `active`
//! flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::InvalidSortKey;

/// Stable course identifier (UUID v4, assigned at registration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from the store.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when deactivation is attempted on a course that topics still
/// reference. The association counts every topic row, active or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot deactivate a course with associated topics")]
pub struct CourseDeactivationBlocked {
    /// Number of topics referencing the course.
    pub topics: u64,
}

/// Forum course grouping topics by subject area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Stable identifier.
    pub id: CourseId,
    /// Course title.
    pub name: String,
    /// Subject area label.
    pub category: String,
    /// Logical liveness flag.
    pub active: bool,
    /// Set once at registration, immutable afterwards.
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    /// Course title.
    pub name: String,
    /// Subject area label.
    pub category: String,
}

/// Partial update for an existing course. `None` retains the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseUpdate {
    /// Identifier of the course to update.
    pub id: CourseId,
    /// Replacement title.
    pub name: Option<String>,
    /// Replacement subject area label.
    pub category: Option<String>,
}

impl Course {
    /// Register a new course: fresh identifier, active, timestamped now.
    pub fn register(draft: NewCourse) -> Self {
        Self {
            id: CourseId::random(),
            name: draft.name,
            category: draft.category,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the fields the update explicitly supplies.
    pub fn apply_update(&mut self, update: &CourseUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(category) = &update.category {
            self.category = category.clone();
        }
    }

    /// Logical delete, blocked while topics reference the course.
    ///
    /// `attached_topics` is the live association count supplied by the
    /// caller; the flag is left untouched when the precondition fails.
    ///
    /// # Errors
    /// Returns [`CourseDeactivationBlocked`] when `attached_topics` is
    /// non-zero.
    pub fn deactivate(&mut self, attached_topics: u64) -> Result<(), CourseDeactivationBlocked> {
        if attached_topics > 0 {
            return Err(CourseDeactivationBlocked {
                topics: attached_topics,
            });
        }
        self.active = false;
        Ok(())
    }
}

/// Sort keys accepted by the course listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CourseSortKey {
    /// Order by title. The listing default.
    #[default]
    Name,
    /// Order by subject area label.
    Category,
    /// Order by registration timestamp.
    CreatedAt,
}

impl std::str::FromStr for CourseSortKey {
    type Err = InvalidSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "createdAt" => Ok(Self::CreatedAt),
            other => Err(InvalidSortKey(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn algorithms() -> Course {
        Course::register(NewCourse {
            name: "Algorithms".to_owned(),
            category: "CS".to_owned(),
        })
    }

    #[rstest]
    fn registration_starts_active_and_timestamped() {
        let course = algorithms();
        assert!(course.active);
        assert!(course.created_at <= Utc::now());
    }

    #[rstest]
    fn deactivation_with_topics_is_blocked_and_leaves_flag() {
        let mut course = algorithms();

        let err = course.deactivate(2).expect_err("blocked");

        assert_eq!(err.topics, 2);
        assert_eq!(
            err.to_string(),
            "cannot deactivate a course with associated topics"
        );
        assert!(course.active);
    }

    #[rstest]
    fn deactivation_without_topics_succeeds() {
        let mut course = algorithms();
        course.deactivate(0).expect("no topics attached");
        assert!(!course.active);
    }

    #[rstest]
    fn update_leaves_unsupplied_fields_alone() {
        let mut course = algorithms();

        course.apply_update(&CourseUpdate {
            id: course.id,
            name: Some("Advanced Algorithms".to_owned()),
            category: None,
        });

        assert_eq!(course.name, "Advanced Algorithms");
        assert_eq!(course.category, "CS");
    }

    #[rstest]
    #[case("name", CourseSortKey::Name)]
    #[case("category", CourseSortKey::Category)]
    #[case("createdAt", CourseSortKey::CreatedAt)]
    fn sort_keys_parse(#[case] token: &str, #[case] expected: CourseSortKey) {
        assert_eq!(token.parse::<CourseSortKey>().ok(), Some(expected));
    }
}
