//! Prefixed entity identifiers.
//!
//! Every id is `<prefix><uuid v4>`. Clients rely on the prefix to tell which
//! kind of entity an id refers to, so it is part of the public contract.

use crate::types::EntityId;

/// The three kinds of entity MailStub stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    User,
    Message,
}

impl EntityKind {
    /// Id prefix for this kind.
    pub const fn prefix(self) -> &'static str {
        match self {
            EntityKind::Project => "p_",
            EntityKind::User => "u_",
            EntityKind::Message => "m_",
        }
    }

    /// Human-readable name, used in confirmation messages.
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::User => "User",
            EntityKind::Message => "Message",
        }
    }

    /// Generate a fresh, globally unique id for this kind.
    pub fn new_id(self) -> EntityId {
        format!("{}{}", self.prefix(), uuid::Uuid::new_v4())
    }

    /// Recover the entity kind from an id, if it carries a known prefix
    /// followed by a non-empty suffix.
    pub fn from_id(id: &str) -> Option<Self> {
        [EntityKind::Project, EntityKind::User, EntityKind::Message]
            .into_iter()
            .find(|kind| {
                id.strip_prefix(kind.prefix())
                    .is_some_and(|suffix| !suffix.is_empty())
            })
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
