//! Builders for engine tests.

use crate::models::{
    DeckId, DeckRef, GameId, GameRef, GroupId, Participation, PlayerId, PlayerRef,
};

pub fn player(id: u32, name: &str) -> PlayerRef {
    PlayerRef {
        id: PlayerId(id),
        name: name.to_string(),
        retired: false,
    }
}

pub fn retired_player(id: u32, name: &str) -> PlayerRef {
    PlayerRef {
        retired: true,
        ..player(id, name)
    }
}

pub fn deck(id: u32, name: &str, colors: &str, commanders: &[&str]) -> DeckRef {
    DeckRef {
        id: DeckId(id),
        name: name.to_string(),
        retired: false,
        colors: colors.to_string(),
        commanders: commanders.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn retired_deck(id: u32, name: &str, colors: &str, commanders: &[&str]) -> DeckRef {
    DeckRef {
        retired: true,
        ..deck(id, name, colors, commanders)
    }
}

/// A participation in game `game_id` with `table_size` seats and no group.
pub fn seat(
    game_id: u32,
    table_size: u32,
    player: &PlayerRef,
    deck: Option<&DeckRef>,
    winner: bool,
) -> Participation {
    Participation::new(
        player.clone(),
        deck.cloned(),
        GameRef {
            id: GameId(game_id),
            date: None,
            group_id: None,
            table_size,
        },
        winner,
    )
}

/// Like [`seat`] but inside a player group.
pub fn grouped_seat(
    game_id: u32,
    table_size: u32,
    group: u32,
    player: &PlayerRef,
    deck: Option<&DeckRef>,
    winner: bool,
) -> Participation {
    let mut p = seat(game_id, table_size, player, deck, winner);
    p.game.group_id = Some(GroupId(group));
    p
}
