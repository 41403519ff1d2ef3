//! Deck model.

use serde::{Deserialize, Serialize};

use super::{DeckId, PlayerId};

/// A deck as stored by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,

    pub name: String,

    /// Owning player
    pub player_id: PlayerId,

    #[serde(default)]
    pub retired: bool,

    /// Colour identity, e.g. "WUB"
    #[serde(default)]
    pub colors: String,

    /// Commander names; partner decks have two
    #[serde(default)]
    pub commanders: Vec<String>,

    /// Power bracket label, display only
    #[serde(default)]
    pub bracket: Option<String>,
}

impl Deck {
    /// Create an active deck with no commanders and no colour identity.
    pub fn new(
        id: impl Into<DeckId>,
        name: impl Into<String>,
        player_id: impl Into<PlayerId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            player_id: player_id.into(),
            retired: false,
            colors: String::new(),
            commanders: Vec::new(),
            bracket: None,
        }
    }

    pub fn with_colors(mut self, colors: impl Into<String>) -> Self {
        self.colors = colors.into();
        self
    }

    pub fn with_commander(mut self, name: impl Into<String>) -> Self {
        self.commanders.push(name.into());
        self
    }

    pub fn retired(mut self) -> Self {
        self.retired = true;
        self
    }

    /// Distinct commander names in ascending order.
    pub fn sorted_commanders(&self) -> Vec<&str> {
        sorted_names(&self.commanders)
    }

    /// Whether any commander matches `name`, ignoring case.
    pub fn has_commander(&self, name: &str) -> bool {
        has_commander(&self.commanders, name)
    }
}

pub(crate) fn sorted_names(names: &[String]) -> Vec<&str> {
    let mut sorted: Vec<&str> = names.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}

pub(crate) fn has_commander(names: &[String], name: &str) -> bool {
    let search = name.trim().to_lowercase();
    names.iter().any(|c| c.trim().to_lowercase() == search)
}
