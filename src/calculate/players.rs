//! Player-level summaries and colour identity win rates.

use std::collections::BTreeMap;

use super::win_record;
use crate::models::{
    ColorStat, Participation, Player, PlayerDetail, PlayerGamesCount, PlayerId, PlayerRef,
    PlayerWinRate, TableSizeBreakdown, TableSizeWinRate,
};

/// Overall win rate of a player.
pub fn player_win_rate(player: &PlayerRef, participations: &[Participation]) -> PlayerWinRate {
    let record = win_record(participations);
    PlayerWinRate {
        player_id: player.id,
        name: player.name.clone(),
        total_games: record.total_games,
        wins: record.wins,
        win_rate: record.win_rate,
    }
}

/// Profile summary of a player.
pub fn player_detail(player: &PlayerRef, participations: &[Participation]) -> PlayerDetail {
    let record = win_record(participations);
    PlayerDetail {
        player_id: player.id,
        name: player.name.clone(),
        retired: player.retired,
        total_games: record.total_games,
        wins: record.wins,
        win_rate: record.win_rate,
    }
}

/// Games played per player, most active first (ties by name).
///
/// `games_for` supplies the count for a player, typically from the store.
pub fn player_game_counts<F>(
    players: &[Player],
    hide_retired: bool,
    games_for: F,
) -> Vec<PlayerGamesCount>
where
    F: Fn(PlayerId) -> u32,
{
    let mut counts: Vec<PlayerGamesCount> = players
        .iter()
        .filter(|p| !hide_retired || !p.retired)
        .map(|p| PlayerGamesCount {
            player_id: p.id,
            name: p.name.clone(),
            retired: p.retired,
            total_games: games_for(p.id),
        })
        .collect();
    counts.sort_by(|a, b| b.total_games.cmp(&a.total_games).then_with(|| a.name.cmp(&b.name)));
    counts
}

/// A player's results grouped by table size, smallest table first.
pub fn table_size_win_rates(
    player: &PlayerRef,
    participations: &[Participation],
) -> TableSizeBreakdown {
    let mut by_size: BTreeMap<u32, Vec<&Participation>> = BTreeMap::new();
    for p in participations {
        by_size.entry(p.game.table_size).or_default().push(p);
    }

    let stats = by_size
        .into_iter()
        .map(|(table_size, games)| {
            let record = win_record(&games);
            TableSizeWinRate {
                table_size,
                total_games: record.total_games,
                wins: record.wins,
                win_rate: record.win_rate,
            }
        })
        .collect();

    TableSizeBreakdown {
        player_id: player.id,
        name: player.name.clone(),
        stats,
    }
}

/// Win rate over the participations selected for a colour identity.
pub fn color_win_rate(colors: &str, participations: &[Participation]) -> ColorStat {
    let record = win_record(participations);
    ColorStat {
        colors: colors.to_string(),
        total_games: record.total_games,
        wins: record.wins,
        win_rate: record.win_rate,
    }
}
