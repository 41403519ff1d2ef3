//! Stats service: resolves ids through a [`ParticipationSource`] and hands
//! the matching participations to the calculation engine.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::info;

use crate::calculate::{self, LeaderboardQuery, ParticipationFilter};
use crate::models::{
    ColorStat, CommanderAmount, CommanderStat, CommanderWinRate, DeckId, DeckStat, GroupId,
    HeadToHead, LeaderboardEntry, Participation, PlayerDetail, PlayerGamesCount, PlayerId,
    PlayerRef, PlayerWinRate, StreakRecord, TableSizeBreakdown, WinrateOverTime,
};
use crate::storage::ParticipationSource;

/// Errors raised when a request names an entity the source does not know.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("Deck not found: {0}")]
    DeckNotFound(DeckId),
}

/// Stats queries over one participation source.
pub struct StatsService<'a, S> {
    source: &'a S,
}

impl<'a, S: ParticipationSource> StatsService<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    fn player_ref(&self, id: PlayerId) -> Result<PlayerRef, StatsError> {
        self.source
            .player(id)
            .map(PlayerRef::from)
            .ok_or(StatsError::PlayerNotFound(id))
    }

    pub fn player_win_rate(
        &self,
        id: PlayerId,
        group_ids: Option<&BTreeSet<GroupId>>,
    ) -> Result<PlayerWinRate, StatsError> {
        let player = self.player_ref(id)?;
        let games = self.source.for_player(id, group_ids);
        Ok(calculate::player_win_rate(&player, &games))
    }

    pub fn player_detail(&self, id: PlayerId) -> Result<PlayerDetail, StatsError> {
        let player = self.player_ref(id)?;
        let games = self.source.for_player(id, None);
        Ok(calculate::player_detail(&player, &games))
    }

    pub fn player_game_counts(&self, hide_retired: bool) -> Vec<PlayerGamesCount> {
        calculate::player_game_counts(self.source.players(), hide_retired, |id| {
            self.source.count_for_player(id)
        })
    }

    pub fn streaks(
        &self,
        id: PlayerId,
        group_ids: Option<&BTreeSet<GroupId>>,
    ) -> Result<StreakRecord, StatsError> {
        let player = self.player_ref(id)?;
        let games = self.source.for_player(id, group_ids);
        Ok(calculate::streaks(&player.name, &games))
    }

    /// Compare two players. An empty `table_sizes` set counts every shared game.
    pub fn head_to_head(
        &self,
        player1: PlayerId,
        player2: PlayerId,
        table_sizes: &BTreeSet<u32>,
    ) -> Result<HeadToHead, StatsError> {
        let p1 = self.player_ref(player1)?;
        let p2 = self.player_ref(player2)?;
        let games1 = self.source.for_player(player1, None);
        let games2 = self.source.for_player(player2, None);
        Ok(calculate::head_to_head(&p1, &games1, &p2, &games2, table_sizes))
    }

    pub fn winrate_over_time(
        &self,
        player: PlayerId,
        deck: DeckId,
        step_size: i32,
        group_ids: Option<BTreeSet<GroupId>>,
    ) -> Result<WinrateOverTime, StatsError> {
        self.player_ref(player)?;
        self.source.deck(deck).ok_or(StatsError::DeckNotFound(deck))?;

        let games = self.source.for_player_and_deck(player, deck);
        let filter = ParticipationFilter::new().group_ids(group_ids);
        Ok(calculate::winrate_over_time(player, deck, &games, step_size, &filter))
    }

    pub fn top_played_decks(
        &self,
        player: PlayerId,
        min_games: u32,
        limit: usize,
        group_ids: Option<&BTreeSet<GroupId>>,
    ) -> Result<Vec<DeckStat>, StatsError> {
        self.player_ref(player)?;
        let games = self.source.for_player(player, group_ids);
        Ok(calculate::top_played_decks(&games, min_games, limit))
    }

    pub fn top_successful_decks(
        &self,
        player: PlayerId,
        min_games: u32,
        limit: usize,
        group_ids: Option<&BTreeSet<GroupId>>,
    ) -> Result<Vec<DeckStat>, StatsError> {
        self.player_ref(player)?;
        let games = self.source.for_player(player, group_ids);
        Ok(calculate::top_successful_decks(&games, min_games, limit))
    }

    pub fn table_size_win_rates(
        &self,
        player: PlayerId,
        group_ids: Option<&BTreeSet<GroupId>>,
    ) -> Result<TableSizeBreakdown, StatsError> {
        let p = self.player_ref(player)?;
        let games = self.source.for_player(player, group_ids);
        Ok(calculate::table_size_win_rates(&p, &games))
    }

    pub fn leaderboard(&self, query: &LeaderboardQuery) -> Vec<LeaderboardEntry> {
        let entries = calculate::leaderboard(&self.source.all(), query);
        info!("Leaderboard by {}: {} entries", query.group_by, entries.len());
        entries
    }

    pub fn commander_win_rate(
        &self,
        commander: &str,
        min_games: u32,
        group_ids: Option<BTreeSet<GroupId>>,
    ) -> CommanderWinRate {
        let all = self.source.all();
        let games = self.in_groups(&all, group_ids);
        calculate::commander_win_rate(&games, commander, min_games)
    }

    pub fn commander_win_rates(
        &self,
        min_games: u32,
        group_ids: Option<BTreeSet<GroupId>>,
    ) -> Vec<CommanderWinRate> {
        let all = self.source.all();
        let games = self.in_groups(&all, group_ids);
        calculate::commander_win_rates(self.source.decks(), &games, min_games)
    }

    pub fn commander_stats(&self, commander: &str) -> CommanderStat {
        calculate::commander_stats(commander, &self.source.with_commander(commander))
    }

    pub fn commander_amounts(&self) -> Vec<CommanderAmount> {
        calculate::commander_amounts(self.source.decks())
    }

    pub fn color_win_rate(&self, colors: &str) -> ColorStat {
        calculate::color_win_rate(colors, &self.source.with_color(colors))
    }

    fn in_groups(
        &self,
        participations: &[Participation],
        group_ids: Option<BTreeSet<GroupId>>,
    ) -> Vec<Participation> {
        let filter = ParticipationFilter::new().group_ids(group_ids);
        filter.apply(participations).into_iter().cloned().collect()
    }
}
