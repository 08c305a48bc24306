//! Users: people who can be board members and card assignees

use super::ids::UserId;
use crate::entity::Entity;
use serde::{Deserialize, Serialize};

/// Avatar shown when a user has none of their own
pub const FALLBACK_AVATAR_URL: &str =
    "https://images.unsplash.com/photo-1494790108755-2616b612b5e5?w=32&h=32&fit=crop&crop=face";

/// A person on the team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Avatar URL, falling back to the shared placeholder
    pub fn avatar_url(&self) -> &str {
        self.avatar.as_deref().unwrap_or(FALLBACK_AVATAR_URL)
    }
}

/// Data for creating a user
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub avatar: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// Field overrides for a user
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    /// None = don't change, Some(None) = clear, Some(Some(x)) = set
    pub avatar: Option<Option<String>>,
}

impl UserPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_avatar(mut self, avatar: Option<String>) -> Self {
        self.avatar = Some(avatar);
        self
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    type Id = UserId;
    type Draft = NewUser;
    type Patch = UserPatch;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn from_draft(id: UserId, draft: NewUser) -> Self {
        Self {
            id,
            name: draft.name,
            avatar: draft.avatar,
        }
    }

    fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
    }
}
