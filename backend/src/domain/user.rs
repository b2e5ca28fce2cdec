//! User data model.
//!
//! Users own topics and replies through id back-references only; removing or
//! deactivating owned content never destroys the user. Deactivation is the
//! sole destructive operation and is logical: the row survives with
//! `active = false`.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Stable user identifier (UUID v4, assigned at registration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
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

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role assigned to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profile {
    /// Full administrative access.
    Admin,
    /// Moderation rights over topics and replies.
    Moderator,
    /// Regular forum participant.
    User,
}

impl Profile {
    /// Wire/storage label for the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::User => "USER",
        }
    }

    /// Parse a storage label. Returns `None` for unrecognised labels so the
    /// caller decides how to degrade.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ADMIN" => Some(Self::Admin),
            "MODERATOR" => Some(Self::Moderator),
            "USER" => Some(Self::User),
            _ => None,
        }
    }
}

/// Registered forum user.
///
/// ## Invariants
/// - `email` is unique across users (enforced by the store).
/// - `active` only ever transitions true → false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: String,
    /// Opaque credential blob; never exposed on read surfaces.
    pub password: String,
    /// Optional contact number.
    pub telephone: Option<String>,
    /// Assigned role.
    pub profile: Profile,
    /// Logical liveness flag.
    pub active: bool,
}

/// Payload for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: String,
    /// Opaque credential blob.
    pub password: String,
    /// Optional contact number.
    pub telephone: Option<String>,
    /// Assigned role.
    pub profile: Profile,
}

/// Partial update for an existing user.
///
/// A `None` field leaves the stored value unchanged; only `Some` fields
/// overwrite, independently of one another. An absent field and an explicit
/// JSON `null` are indistinguishable, so the update cannot clear
/// `telephone`; that is the carried-over wire contract. The role is not
/// updatable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdate {
    /// Identifier of the user to update.
    pub id: UserId,
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement contact address.
    pub email: Option<String>,
    /// Replacement credential blob.
    pub password: Option<String>,
    /// Replacement contact number.
    pub telephone: Option<String>,
}

impl User {
    /// Register a new user: fresh identifier, active by default.
    pub fn register(draft: NewUser) -> Self {
        Self {
            id: UserId::random(),
            name: draft.name,
            email: draft.email,
            password: draft.password,
            telephone: draft.telephone,
            profile: draft.profile,
            active: true,
        }
    }

    /// Overwrite the fields the update explicitly supplies.
    pub fn apply_update(&mut self, update: &UserUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(password) = &update.password {
            self.password = password.clone();
        }
        if let Some(telephone) = &update.telephone {
            self.telephone = Some(telephone.clone());
        }
    }

    /// Logical delete. One-way: nothing reactivates a user.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// Sort keys accepted by the user listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserSortKey {
    /// Order by display name. The listing default.
    #[default]
    Name,
    /// Order by contact address.
    Email,
}

impl std::str::FromStr for UserSortKey {
    type Err = super::InvalidSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            other => Err(super::InvalidSortKey(other.to_owned())),
        }
    }
}
