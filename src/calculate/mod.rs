//! Statistics calculation engine.
//!
//! Pure computations over slices of [`Participation`] records:
//! - Win rates and leaderboards by player, commander or colour
//! - Win/loss streak detection
//! - Head-to-head comparison of two players
//! - Cumulative win rate over time for one deck
//! - Per-deck, per-table-size and per-commander breakdowns
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod commanders;
pub mod decks;
pub mod grouping;
pub mod head_to_head;
pub mod leaderboard;
pub mod players;
pub mod streaks;
pub mod timeline;

#[cfg(test)]
pub(crate) mod fixtures;

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::models::{Participation, WinRecord};

pub use commanders::{commander_amounts, commander_stats, commander_win_rate, commander_win_rates};
pub use decks::{deck_stats, top_played_decks, top_successful_decks};
pub use grouping::{group_participations, GroupBy, ParseGroupByError, ParticipationFilter};
pub use head_to_head::head_to_head;
pub use leaderboard::{leaderboard, LeaderboardQuery};
pub use players::{
    color_win_rate, player_detail, player_game_counts, player_win_rate, table_size_win_rates,
};
pub use streaks::{streaks, streaks_from_outcomes};
pub use timeline::winrate_over_time;

/// Calculate win rate from wins and games played.
pub fn calculate_win_rate(wins: u32, total_games: u32) -> f64 {
    if total_games == 0 {
        0.0
    } else {
        wins as f64 / total_games as f64
    }
}

/// Count winning participations. Every flagged winner counts, even when a
/// game has more than one.
pub fn count_wins<P: Borrow<Participation>>(participations: &[P]) -> u32 {
    participations
        .iter()
        .filter(|p| Borrow::<Participation>::borrow(*p).winner)
        .count() as u32
}

/// Win rate over a list of participations; 0.0 for an empty list.
pub fn win_rate<P: Borrow<Participation>>(participations: &[P]) -> f64 {
    calculate_win_rate(count_wins(participations), participations.len() as u32)
}

/// `(total_games, wins, win_rate)` over a list of participations.
pub fn win_record<P: Borrow<Participation>>(participations: &[P]) -> WinRecord {
    WinRecord::new(participations.len() as u32, count_wins(participations))
}

/// Descending comparison of two win rates.
pub(crate) fn by_win_rate_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
