//! Game participation records.
//!
//! A [`Participation`] is one player's appearance in one game with one deck.
//! It carries denormalized snapshots of the player, deck and game so that
//! every statistic can be computed from a plain slice without lookups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::deck::{has_commander, sorted_names};
use super::{Deck, DeckId, Game, GameId, GroupId, Player, PlayerId};

/// Player snapshot attached to a participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
    pub retired: bool,
}

impl From<&Player> for PlayerRef {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            retired: p.retired,
        }
    }
}

/// Deck snapshot attached to a participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckRef {
    pub id: DeckId,
    pub name: String,
    pub retired: bool,
    pub colors: String,
    pub commanders: Vec<String>,
}

impl DeckRef {
    pub fn sorted_commanders(&self) -> Vec<&str> {
        sorted_names(&self.commanders)
    }

    pub fn has_commander(&self, name: &str) -> bool {
        has_commander(&self.commanders, name)
    }
}

impl From<&Deck> for DeckRef {
    fn from(d: &Deck) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            retired: d.retired,
            colors: d.colors.clone(),
            commanders: d.commanders.clone(),
        }
    }
}

/// Game snapshot attached to a participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRef {
    /// Chronological order key
    pub id: GameId,
    pub date: Option<NaiveDate>,
    pub group_id: Option<GroupId>,
    /// Number of participations in the game
    pub table_size: u32,
}

impl From<&Game> for GameRef {
    fn from(g: &Game) -> Self {
        Self {
            id: g.id,
            date: g.date,
            group_id: g.group_id,
            table_size: g.table_size(),
        }
    }
}

/// One player's appearance in one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub player: PlayerRef,
    pub deck: Option<DeckRef>,
    pub game: GameRef,
    pub winner: bool,
    pub notes: Option<String>,
}

impl Participation {
    pub fn new(player: PlayerRef, deck: Option<DeckRef>, game: GameRef, winner: bool) -> Self {
        Self {
            player,
            deck,
            game,
            winner,
            notes: None,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player.id
    }

    pub fn game_id(&self) -> GameId {
        self.game.id
    }

    pub fn deck_id(&self) -> Option<DeckId> {
        self.deck.as_ref().map(|d| d.id)
    }

    /// Whether the deck used is retired. A participation without a deck is not.
    pub fn deck_retired(&self) -> bool {
        self.deck.as_ref().is_some_and(|d| d.retired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameSeat;

    #[test]
    fn test_refs_from_entities() {
        let player = Player::new(1, "Alice").retired();
        let deck = Deck::new(10, "Atraxa Superfriends", 1)
            .with_colors("WUBG")
            .with_commander("Atraxa, Praetors' Voice");
        let game = Game {
            id: GameId(5),
            date: None,
            group_id: Some(GroupId(2)),
            notes: None,
            seats: vec![
                GameSeat {
                    player_id: PlayerId(1),
                    deck_id: Some(DeckId(10)),
                    winner: true,
                    notes: None,
                },
                GameSeat {
                    player_id: PlayerId(2),
                    deck_id: None,
                    winner: false,
                    notes: None,
                },
            ],
        };

        let p = Participation::new((&player).into(), Some((&deck).into()), (&game).into(), true);

        assert_eq!(p.player_id(), PlayerId(1));
        assert!(p.player.retired);
        assert_eq!(p.deck_id(), Some(DeckId(10)));
        assert_eq!(p.game.table_size, 2);
        assert_eq!(p.game.group_id, Some(GroupId(2)));
        assert_eq!(p.notes, None);
        assert!(!p.deck_retired());
    }

    #[test]
    fn test_deck_retired_without_deck() {
        let p = Participation::new(
            PlayerRef {
                id: PlayerId(1),
                name: "Alice".into(),
                retired: false,
            },
            None,
            GameRef {
                id: GameId(1),
                date: None,
                group_id: None,
                table_size: 4,
            },
            false,
        );
        assert!(!p.deck_retired());
        assert_eq!(p.deck_id(), None);
    }
}
