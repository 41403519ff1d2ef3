//! Game model as stored by the tracker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DeckId, GameId, GroupId, PlayerId};

/// One seat at a game, referencing player and deck by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSeat {
    pub player_id: PlayerId,

    #[serde(default)]
    pub deck_id: Option<DeckId>,

    #[serde(default)]
    pub winner: bool,

    #[serde(default)]
    pub notes: Option<String>,
}

/// A recorded game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Chronological order key
    pub id: GameId,

    /// Date the game was played; display only, not guaranteed monotonic with `id`
    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub group_id: Option<GroupId>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default)]
    pub seats: Vec<GameSeat>,
}

impl Game {
    /// Number of participations in this game.
    pub fn table_size(&self) -> u32 {
        self.seats.len() as u32
    }
}
