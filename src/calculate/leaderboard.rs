//! Leaderboards by player, commander combination or colour identity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grouping::{group_participations, GroupBy, ParticipationFilter};
use super::{by_win_rate_desc, win_record};
use crate::models::{GroupId, LeaderboardEntry, Participation};

/// Parameters of a leaderboard request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub group_by: GroupBy,

    /// Groups with fewer games are dropped
    pub min_games: u32,

    pub hide_retired_players: bool,
    pub hide_retired_decks: bool,

    /// Table sizes to include. An empty set yields an empty leaderboard.
    pub table_sizes: BTreeSet<u32>,

    /// Player groups to include; `None` includes every game
    pub group_ids: Option<BTreeSet<GroupId>>,
}

impl LeaderboardQuery {
    /// Query with no minimum, no retired filtering and the usual 3-6 player tables.
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            min_games: 0,
            hide_retired_players: false,
            hide_retired_decks: false,
            table_sizes: [3, 4, 5, 6].into(),
            group_ids: None,
        }
    }

    fn filter(&self) -> ParticipationFilter {
        ParticipationFilter::new()
            .hide_retired_players(self.hide_retired_players)
            .hide_retired_decks(self.hide_retired_decks)
            .table_sizes(self.table_sizes.clone())
            .group_ids(self.group_ids.clone())
    }
}

/// Build a leaderboard.
///
/// Entries are ordered by descending win rate, then descending games played,
/// then ascending key.
pub fn leaderboard(
    participations: &[Participation],
    query: &LeaderboardQuery,
) -> Vec<LeaderboardEntry> {
    if query.table_sizes.is_empty() {
        debug!("Empty table size selection, returning empty leaderboard");
        return Vec::new();
    }

    let filtered = query.filter().apply(participations);
    let groups = group_participations(filtered.iter().copied(), query.group_by);

    let mut entries: Vec<LeaderboardEntry> = groups
        .into_iter()
        .map(|(key, games)| LeaderboardEntry::new(key, win_record(&games)))
        .filter(|e| e.total_games >= query.min_games)
        .collect();

    entries.sort_by(|a, b| {
        by_win_rate_desc(a.win_rate, b.win_rate)
            .then_with(|| b.total_games.cmp(&a.total_games))
            .then_with(|| a.key.cmp(&b.key))
    });

    debug!(
        "Leaderboard by {}: {} of {} participations kept, {} entries",
        query.group_by,
        filtered.len(),
        participations.len(),
        entries.len()
    );

    entries
}
