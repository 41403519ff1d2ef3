//! Derived statistics models.
//!
//! Every statistic returned by the engine is one of these immutable value
//! objects. Win rates are fractions in `[0.0, 1.0]`.

use serde::{Deserialize, Serialize};

use super::{DeckId, PlayerId};
use crate::calculate::calculate_win_rate;

/// Games played, games won and the resulting win rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WinRecord {
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

impl WinRecord {
    /// Build a record; the win rate is 0.0 when no games were played.
    pub fn new(total_games: u32, wins: u32) -> Self {
        Self {
            total_games,
            wins,
            win_rate: calculate_win_rate(wins, total_games),
        }
    }
}

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name, commander combination or colour identity
    pub key: String,
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

impl LeaderboardEntry {
    pub fn new(key: impl Into<String>, record: WinRecord) -> Self {
        Self {
            key: key.into(),
            total_games: record.total_games,
            wins: record.wins,
            win_rate: record.win_rate,
        }
    }
}

/// Overall win rate of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWinRate {
    pub player_id: PlayerId,
    pub name: String,
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

/// Player profile summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDetail {
    pub player_id: PlayerId,
    pub name: String,
    pub retired: bool,
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

/// Number of games a player has taken part in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGamesCount {
    pub player_id: PlayerId,
    pub name: String,
    pub retired: bool,
    pub total_games: u32,
}

/// Win rate of every deck led by one commander.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommanderWinRate {
    pub commander: String,
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

/// Popularity and performance of one commander across all players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommanderStat {
    pub commander: String,
    /// Distinct games the commander appeared in
    pub total_games: u32,
    /// Distinct players who piloted the commander
    pub total_players: u32,
    pub total_wins: u32,
    pub win_rate: f64,
}

/// Number of decks built around one commander combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommanderAmount {
    /// Commander names, sorted and joined with ", "
    pub commanders: String,
    pub count: u32,
}

/// Win rate of decks whose colour identity contains a given string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStat {
    pub colors: String,
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

/// Signed run lengths of consecutive wins (positive) and losses (negative).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub player_name: String,
    pub streaks: Vec<i32>,
}

/// Two players compared overall and in the games they shared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub player1_id: PlayerId,
    pub player1_name: String,
    pub player2_id: PlayerId,
    pub player2_name: String,

    pub total_games_player1: u32,
    pub total_games_player2: u32,

    /// Distinct games both players took part in
    pub games_together: u32,

    pub player1_wins_together: u32,
    pub player2_wins_together: u32,

    pub win_rate_player1_overall: f64,
    pub win_rate_player2_overall: f64,

    pub win_rate_player1_together: f64,
    pub win_rate_player2_together: f64,

    /// Together minus overall; positive means player 1 over-performs against player 2
    pub delta_player1: f64,
    pub delta_player2: f64,
}

/// One sample of a cumulative win-rate curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinratePoint {
    pub games_played: u32,
    pub wins: u32,
    pub win_rate: f64,
}

/// Cumulative win rate of one player with one deck, sampled every `step_size` games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinrateOverTime {
    pub player_id: PlayerId,
    pub deck_id: DeckId,
    pub step_size: u32,
    pub points: Vec<WinratePoint>,
}

/// Performance of one deck for its pilot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckStat {
    pub deck_id: DeckId,
    pub deck_name: String,
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub retired: bool,
}

/// Performance at one table size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSizeWinRate {
    pub table_size: u32,
    pub total_games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

/// A player's performance broken down by table size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSizeBreakdown {
    pub player_id: PlayerId,
    pub name: String,
    pub stats: Vec<TableSizeWinRate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_record_zero_games() {
        let r = WinRecord::new(0, 0);
        assert_eq!(r.win_rate, 0.0);
        assert!(!r.win_rate.is_nan());
    }

    #[test]
    fn test_win_record_rate() {
        let r = WinRecord::new(4, 1);
        assert_eq!(r.win_rate, 0.25);
    }

    #[test]
    fn test_leaderboard_entry_from_record() {
        let e = LeaderboardEntry::new("Alice", WinRecord::new(2, 2));
        assert_eq!(e.key, "Alice");
        assert_eq!(e.total_games, 2);
        assert_eq!(e.win_rate, 1.0);
    }

    #[test]
    fn test_winrate_over_time_serialization() {
        let curve = WinrateOverTime {
            player_id: PlayerId(1),
            deck_id: DeckId(2),
            step_size: 3,
            points: vec![WinratePoint {
                games_played: 3,
                wins: 1,
                win_rate: 1.0 / 3.0,
            }],
        };

        let json = serde_json::to_string(&curve).unwrap();
        let deserialized: WinrateOverTime = serde_json::from_str(&json).unwrap();

        assert_eq!(curve, deserialized);
        assert!(json.contains("\"player_id\":1"));
    }
}
