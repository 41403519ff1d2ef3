//! In-memory snapshot of the tracker data.

use std::collections::{BTreeSet, HashMap};

use tracing::{info, warn};

use super::{EntityType, JsonlReader, StorageConfig, StorageError};
use crate::models::{
    Deck, DeckId, DeckRef, Game, GameRef, Group, GroupId, Participation, Player, PlayerId,
    PlayerRef,
};

/// Queries the stats service runs against the tracker data.
///
/// Returned participations are owned copies; callers may reorder or filter
/// them freely.
pub trait ParticipationSource {
    fn players(&self) -> &[Player];

    fn decks(&self) -> &[Deck];

    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players().iter().find(|p| p.id == id)
    }

    fn deck(&self, id: DeckId) -> Option<&Deck> {
        self.decks().iter().find(|d| d.id == id)
    }

    /// Every participation.
    fn all(&self) -> Vec<Participation>;

    /// Participations of one player, optionally restricted to games in `group_ids`.
    fn for_player(
        &self,
        id: PlayerId,
        group_ids: Option<&BTreeSet<GroupId>>,
    ) -> Vec<Participation>;

    /// Participations whose deck colour identity contains `colors`.
    fn with_color(&self, colors: &str) -> Vec<Participation>;

    /// Participations whose deck includes the commander `name`, ignoring case.
    fn with_commander(&self, name: &str) -> Vec<Participation>;

    /// Number of participations of one player.
    fn count_for_player(&self, id: PlayerId) -> u32;

    /// Participations of one player with one deck.
    fn for_player_and_deck(&self, player: PlayerId, deck: DeckId) -> Vec<Participation>;
}

/// Players, decks, groups and resolved participations loaded from JSONL.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    players: Vec<Player>,
    decks: Vec<Deck>,
    groups: Vec<Group>,
    participations: Vec<Participation>,
}

impl Snapshot {
    /// Load every entity file from the data directory.
    pub fn load(config: &StorageConfig) -> Result<Self, StorageError> {
        let players = JsonlReader::<Player>::for_entity(config, EntityType::Player).read_all()?;
        let decks = JsonlReader::<Deck>::for_entity(config, EntityType::Deck).read_all()?;
        let groups = JsonlReader::<Group>::for_entity(config, EntityType::Group).read_all()?;
        let games = JsonlReader::<Game>::for_entity(config, EntityType::Game).read_all()?;

        let snapshot = Self::from_parts(players, decks, groups, &games);
        info!(
            "Loaded {} players, {} decks, {} games, {} participations from {:?}",
            snapshot.players.len(),
            snapshot.decks.len(),
            games.len(),
            snapshot.participations.len(),
            config.data_dir
        );
        Ok(snapshot)
    }

    /// Resolve game seats against players and decks.
    ///
    /// Seats naming an unknown player are dropped. Seats naming an unknown
    /// deck keep the participation with no deck.
    pub fn from_parts(
        players: Vec<Player>,
        decks: Vec<Deck>,
        groups: Vec<Group>,
        games: &[Game],
    ) -> Self {
        let player_refs: HashMap<PlayerId, PlayerRef> =
            players.iter().map(|p| (p.id, PlayerRef::from(p))).collect();
        let deck_refs: HashMap<DeckId, DeckRef> =
            decks.iter().map(|d| (d.id, DeckRef::from(d))).collect();

        let mut participations = Vec::new();
        for game in games {
            let game_ref = GameRef::from(game);
            for seat in &game.seats {
                let Some(player) = player_refs.get(&seat.player_id) else {
                    warn!(
                        "Game {} references unknown player {}, skipping seat",
                        game.id, seat.player_id
                    );
                    continue;
                };

                let deck = seat.deck_id.and_then(|id| {
                    let deck = deck_refs.get(&id).cloned();
                    if deck.is_none() {
                        warn!("Game {} references unknown deck {}", game.id, id);
                    }
                    deck
                });

                participations.push(Participation {
                    player: player.clone(),
                    deck,
                    game: game_ref.clone(),
                    winner: seat.winner,
                    notes: seat.notes.clone(),
                });
            }
        }

        Self {
            players,
            decks,
            groups,
            participations,
        }
    }

    /// The group flagged as default, if any.
    pub fn default_group(&self) -> Option<&Group> {
        self.groups.iter().find(|g| g.is_default)
    }

    /// Group restriction used when a request names none: the default group
    /// alone, or no restriction when no group is flagged.
    pub fn default_group_ids(&self) -> Option<BTreeSet<GroupId>> {
        self.default_group().map(|g| BTreeSet::from([g.id]))
    }

    fn select<F>(&self, predicate: F) -> Vec<Participation>
    where
        F: Fn(&Participation) -> bool,
    {
        self.participations
            .iter()
            .filter(|&p| predicate(p))
            .cloned()
            .collect()
    }
}

impl ParticipationSource for Snapshot {
    fn players(&self) -> &[Player] {
        &self.players
    }

    fn decks(&self) -> &[Deck] {
        &self.decks
    }

    fn all(&self) -> Vec<Participation> {
        self.participations.clone()
    }

    fn for_player(
        &self,
        id: PlayerId,
        group_ids: Option<&BTreeSet<GroupId>>,
    ) -> Vec<Participation> {
        self.select(|p| {
            p.player_id() == id
                && group_ids.map_or(true, |groups| {
                    p.game.group_id.is_some_and(|g| groups.contains(&g))
                })
        })
    }

    fn with_color(&self, colors: &str) -> Vec<Participation> {
        self.select(|p| p.deck.as_ref().is_some_and(|d| d.colors.contains(colors)))
    }

    fn with_commander(&self, name: &str) -> Vec<Participation> {
        self.select(|p| p.deck.as_ref().is_some_and(|d| d.has_commander(name)))
    }

    fn count_for_player(&self, id: PlayerId) -> u32 {
        self.participations
            .iter()
            .filter(|p| p.player_id() == id)
            .count() as u32
    }

    fn for_player_and_deck(&self, player: PlayerId, deck: DeckId) -> Vec<Participation> {
        self.select(|p| p.player_id() == player && p.deck_id() == Some(deck))
    }
}
