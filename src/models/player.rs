//! Player and player group models.

use serde::{Deserialize, Serialize};

use super::{GroupId, PlayerId};

/// A player as stored by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    pub name: String,

    /// Retired players are still counted unless a query hides them
    #[serde(default)]
    pub retired: bool,

    /// Groups this player belongs to
    #[serde(default)]
    pub group_ids: Vec<GroupId>,
}

impl Player {
    /// Create an active player with no group memberships.
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            retired: false,
            group_ids: Vec::new(),
        }
    }

    /// Mark the player as retired.
    pub fn retired(mut self) -> Self {
        self.retired = true;
        self
    }
}

/// A player group (e.g. a regular playgroup or a tournament).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}
