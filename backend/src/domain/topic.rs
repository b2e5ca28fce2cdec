//! Topic data model.
//!
//! A topic belongs to its author (required, immutable) and optionally to a
//! course. It exclusively owns its replies: a topic row only disappears by
//! cascade from its course's physical removal, and its replies go with it.
//! The API surface soft-deletes topics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::course::CourseId;
use super::user::UserId;
use super::InvalidSortKey;

/// Stable topic identifier (UUID v4, assigned at creation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct TopicId(Uuid);

impl TopicId {
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

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discussion state of a topic.
///
/// Any status may replace any other; no transition graph is enforced, and
/// reply solution-marking does not feed back into it. The status is set by
/// the caller alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicStatus {
    /// Nobody has replied yet. The creation default.
    #[default]
    NoResponse,
    /// Replies exist but none resolves the question.
    Unsolved,
    /// The question is considered answered.
    Solved,
    /// The discussion is closed to further activity.
    Closed,
}

impl TopicStatus {
    /// Wire/storage label for the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoResponse => "NO_RESPONSE",
            Self::Unsolved => "UNSOLVED",
            Self::Solved => "SOLVED",
            Self::Closed => "CLOSED",
        }
    }

    /// Parse a storage label. Returns `None` for unrecognised labels so the
    /// caller decides how to degrade.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "NO_RESPONSE" => Some(Self::NoResponse),
            "UNSOLVED" => Some(Self::Unsolved),
            "SOLVED" => Some(Self::Solved),
            "CLOSED" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Forum discussion topic.
///
/// ## Invariants
/// - `user_id` (the author) never changes after creation.
/// - `created_at` is set once.
/// - `active` only ever transitions true → false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Stable identifier.
    pub id: TopicId,
    /// Headline shown in listings.
    pub title: String,
    /// Free-text body.
    pub message: String,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
    /// Caller-managed discussion state.
    pub status: TopicStatus,
    /// Logical liveness flag.
    pub active: bool,
    /// Author back-reference.
    pub user_id: UserId,
    /// Owning course back-reference, when the topic belongs to one.
    pub course_id: Option<CourseId>,
}

/// Payload for opening a new topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopic {
    /// Headline shown in listings.
    pub title: String,
    /// Free-text body.
    pub message: String,
    /// Initial discussion state; callers usually leave the default.
    pub status: TopicStatus,
    /// Author reference; must resolve to an existing user.
    pub user_id: UserId,
    /// Optional owning course; must resolve when supplied.
    pub course_id: Option<CourseId>,
}

/// Partial update for an existing topic. `None` retains the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicUpdate {
    /// Identifier of the topic to update.
    pub id: TopicId,
    /// Replacement headline.
    pub title: Option<String>,
    /// Replacement body.
    pub message: Option<String>,
    /// Replacement discussion state.
    pub status: Option<TopicStatus>,
}

impl Topic {
    /// Open a new topic: fresh identifier, active, timestamped now.
    pub fn open(draft: NewTopic) -> Self {
        Self {
            id: TopicId::random(),
            title: draft.title,
            message: draft.message,
            created_at: Utc::now(),
            status: draft.status,
            active: true,
            user_id: draft.user_id,
            course_id: draft.course_id,
        }
    }

    /// Overwrite the fields the update explicitly supplies.
    pub fn apply_update(&mut self, update: &TopicUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(message) = &update.message {
            self.message = message.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }

    /// Logical delete. One-way: nothing reactivates a topic.
    ///
    /// Deactivation also detaches the topic from its course, so the course's
    /// live association empties and the course becomes eligible for
    /// deactivation itself.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.course_id = None;
    }
}

/// Sort keys accepted by the topic listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TopicSortKey {
    /// Order by creation timestamp. The listing default.
    #[default]
    CreatedAt,
    /// Order by headline.
    Title,
}

impl std::str::FromStr for TopicSortKey {
    type Err = InvalidSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "createdAt" => Ok(Self::CreatedAt),
            "title" => Ok(Self::Title),
            other => Err(InvalidSortKey(other.to_owned())),
        }
    }
}
