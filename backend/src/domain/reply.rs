//! Reply data model.
//!
//! A reply references its topic and respondent (both required, immutable).
//! Solution-marking is a plain two-state toggle per reply: several replies
//! under one topic may be marked solutions at once, and the flag never feeds
//! back into the topic's status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::topic::TopicId;
use super::user::UserId;
use super::InvalidSortKey;

/// Stable reply identifier (UUID v4, assigned at creation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ReplyId(Uuid);

impl ReplyId {
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

impl std::fmt::Display for ReplyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reply posted under a topic.
///
/// ## Invariants
/// - `topic_id` and `user_id` never change after creation.
/// - `created_at` is set once.
/// - `active` only ever transitions true → false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Stable identifier.
    pub id: ReplyId,
    /// Free-text body.
    pub message: String,
    /// Set once at creation, immutable afterwards.
    pub created_at: DateTime<Utc>,
    /// Whether the author of the topic considers this reply a solution.
    pub solution: bool,
    /// Logical liveness flag.
    pub active: bool,
    /// Owning topic back-reference.
    pub topic_id: TopicId,
    /// Respondent back-reference.
    pub user_id: UserId,
}

/// Payload for posting a new reply. Both references must resolve before
/// anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReply {
    /// Free-text body.
    pub message: String,
    /// Topic the reply answers.
    pub topic_id: TopicId,
    /// Respondent reference.
    pub user_id: UserId,
}

/// Partial update for an existing reply. `None` retains the stored value;
/// `solution` maps to the mark/unmark toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyUpdate {
    /// Identifier of the reply to update.
    pub id: ReplyId,
    /// Replacement body.
    pub message: Option<String>,
    /// Toggle target for the solution flag.
    pub solution: Option<bool>,
}

impl Reply {
    /// Post a new reply: fresh identifier, active, not yet a solution.
    pub fn post(draft: NewReply) -> Self {
        Self {
            id: ReplyId::random(),
            message: draft.message,
            created_at: Utc::now(),
            solution: false,
            active: true,
            topic_id: draft.topic_id,
            user_id: draft.user_id,
        }
    }

    /// Flag this reply as a solution.
    pub fn mark_as_solution(&mut self) {
        self.solution = true;
    }

    /// Withdraw the solution flag.
    pub fn unmark_as_solution(&mut self) {
        self.solution = false;
    }

    /// Overwrite the fields the update explicitly supplies.
    pub fn apply_update(&mut self, update: &ReplyUpdate) {
        if let Some(message) = &update.message {
            self.message = message.clone();
        }
        match update.solution {
            Some(true) => self.mark_as_solution(),
            Some(false) => self.unmark_as_solution(),
            None => {}
        }
    }

    /// Logical delete. One-way: nothing reactivates a reply.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Sort keys accepted by the reply listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplySortKey {
    /// Order by creation timestamp. The listing default.
    #[default]
    CreatedAt,
}

impl std::str::FromStr for ReplySortKey {
    type Err = InvalidSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "createdAt" => Ok(Self::CreatedAt),
            other => Err(InvalidSortKey(other.to_owned())),
        }
    }
}
